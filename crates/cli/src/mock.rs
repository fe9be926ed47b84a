//! Mock complaint generator for demos and end-to-end runs

use chrono::{DateTime, Duration, Utc};
use complaint_triage_core::IncomingComplaint;
use rand::seq::SliceRandom;
use rand::Rng;

const TEMPLATES: &[&str] = &[
    "我在{date}订购的{product}至今还未收到，订单号是{order_number}。我已经等了{days}天，远超预期送达时间。请尽快处理或者退款。",
    "我收到的{product}已经损坏了，包装也很差。订单号{order_number}，价格{amount}元。这样的质量太差了，我要求退货退款。",
    "我对贵公司的客服态度非常不满。我多次联系关于订单{order_number}的{product}问题，但总是得不到及时回复。这种服务太差了。",
    "我购买的{product}和描述完全不符，质量非常差。订单号{order_number}，价格{amount}元。我要求退货并全额退款。",
    "{product}收到后发现是假货，与官方产品相差很大。订单号{order_number}，希望尽快给我答复，否则我将投诉消费者协会。",
    "我在{date}参加了你们的促销活动，购买了{product}，订单号{order_number}，但没有享受到承诺的折扣{amount}元。请解释清楚。",
    "你们的App系统有问题，我无法查看我的订单{order_number}，也无法联系客服。这已经是本月第三次出现这种问题了。",
    "我想退货退款我在{date}买的{product}（订单号{order_number}），但是系统一直提示错误，客服也联系不上，太让人失望了。",
];

const PRODUCTS: &[&str] = &[
    "iPhone 13", "华为 P50", "小米11", "三星 Galaxy S21", "苹果耳机", "罗技鼠标", "机械键盘",
    "游戏显示器", "Nike运动鞋", "Adidas外套", "Puma背包", "New Balance跑鞋", "索尼相机",
    "佳能打印机", "戴尔笔记本", "华硕显卡", "电饭煲", "微波炉", "洗衣机", "冰箱",
];

const NAMES: &[&str] = &["zhang", "li", "wang", "chen", "liu", "yang", "huang", "zhao", "wu", "zhou"];

const DOMAINS: &[&str] = &["gmail.com", "yahoo.com", "hotmail.com", "qq.com", "163.com", "126.com"];

fn pick<'a, R: Rng + ?Sized>(rng: &mut R, items: &[&'a str]) -> &'a str {
    items.choose(rng).copied().unwrap_or_default()
}

fn order_number<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("ORD-{}", rng.gen_range(10_000_000..=99_999_999u32))
}

/// Generate `count` complaints relative to `now`
pub fn generate_complaints<R: Rng + ?Sized>(
    count: usize,
    rng: &mut R,
    now: DateTime<Utc>,
) -> Vec<IncomingComplaint> {
    (0..count)
        .map(|i| {
            let product = pick(rng, PRODUCTS);
            let order_number = order_number(rng);
            let purchase_date = (now - Duration::days(rng.gen_range(1..=30))).format("%Y-%m-%d");
            let days: i64 = rng.gen_range(3..=15);
            let amount = rng.gen_range(100..=5000u32) as f64 + rng.gen_range(0..=99u32) as f64 / 100.0;

            let content = pick(rng, TEMPLATES)
                .replace("{date}", &purchase_date.to_string())
                .replace("{product}", product)
                .replace("{order_number}", &order_number)
                .replace("{days}", &days.to_string())
                .replace("{amount}", &format!("{:.2}", amount));

            let subjects = [
                format!("关于{}的投诉", product),
                format!("订单{}问题反馈", order_number),
                format!("对{}质量的投诉", product),
                "客服服务投诉".to_string(),
                format!("退款请求：{}", order_number),
                format!("产品质量问题：{}", product),
            ];
            let subject = subjects[rng.gen_range(0..subjects.len())].clone();

            let sender = format!(
                "{}{}@{}",
                pick(rng, NAMES),
                rng.gen_range(100..=999u32),
                pick(rng, DOMAINS)
            );
            let received = now - Duration::minutes(rng.gen_range(1..=60 * 24 * days));

            IncomingComplaint {
                id: Some(format!("TEST{}", i + 1)),
                sender: Some(sender),
                subject: Some(subject),
                content: Some(content),
                date: Some(received.format("%Y-%m-%d %H:%M:%S").to_string()),
                order_number: Some(order_number),
            }
        })
        .collect()
}
