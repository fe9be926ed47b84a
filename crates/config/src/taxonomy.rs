//! Complaint category taxonomy
//!
//! A taxonomy maps category names to trigger keywords. Category order is
//! significant: the keyword classifier breaks ties in favour of the category
//! that comes first, so documents are read preserving key order.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::ConfigError;

/// Case-fold text for keyword matching
pub fn fold_case(text: &str) -> String {
    text.to_lowercase()
}

/// A single taxonomy category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    name: String,
    keywords: Vec<String>,
    folded: Vec<String>,
}

impl Category {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Keywords as configured
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Case-folded keywords, deduplicated
    pub fn folded_keywords(&self) -> &[String] {
        &self.folded
    }
}

/// Ordered, validated category taxonomy
///
/// Invariants: at least one category, unique non-blank names, and every
/// category has at least one non-blank keyword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Taxonomy {
    categories: Vec<Category>,
}

impl Taxonomy {
    /// Build a taxonomy from (category, keywords) entries, in iteration order
    pub fn new<K, V, I>(entries: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: IntoIterator,
        V::Item: Into<String>,
    {
        let mut categories: Vec<Category> = Vec::new();

        for (name, keywords) in entries {
            let name: String = name.into();
            if name.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "taxonomy".to_string(),
                    message: "category name must not be blank".to_string(),
                });
            }
            if categories.iter().any(|c| c.name == name) {
                return Err(ConfigError::InvalidValue {
                    field: format!("taxonomy.{}", name),
                    message: "duplicate category".to_string(),
                });
            }

            let mut kept = Vec::new();
            let mut folded = Vec::new();
            for keyword in keywords {
                let keyword: String = keyword.into();
                if keyword.trim().is_empty() {
                    return Err(ConfigError::InvalidValue {
                        field: format!("taxonomy.{}", name),
                        message: "keywords must not be blank".to_string(),
                    });
                }
                let key = fold_case(&keyword);
                if !folded.contains(&key) {
                    folded.push(key);
                    kept.push(keyword);
                }
            }

            if kept.is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: format!("taxonomy.{}", name),
                    message: "category needs at least one keyword".to_string(),
                });
            }

            categories.push(Category {
                name,
                keywords: kept,
                folded,
            });
        }

        if categories.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "taxonomy".to_string(),
                message: "at least one category required".to_string(),
            });
        }

        Ok(Self { categories })
    }

    /// Categories in taxonomy order
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Category names in taxonomy order
    pub fn names(&self) -> Vec<String> {
        self.categories.iter().map(|c| c.name.clone()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Always false for a validated taxonomy
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Load from a JSON or YAML file, chosen by extension
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }

        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::ParseError(e.to_string()))?;

        let taxonomy = match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_str(&content)?,
            _ => Self::from_json_str(&content)?,
        };

        tracing::info!(
            categories = taxonomy.len(),
            path = %path.display(),
            "Loaded complaint taxonomy"
        );
        Ok(taxonomy)
    }
}

impl Default for Taxonomy {
    /// Built-in e-commerce complaint taxonomy
    fn default() -> Self {
        let entries: [(&str, &[&str]); 8] = [
            (
                "物流延迟",
                &["延迟", "还没到", "运输时间", "配送慢", "物流", "快递", "发货", "到达", "等待"],
            ),
            (
                "商品损坏",
                &["损坏", "破损", "不完整", "质量问题", "有缺陷", "坏了", "不能用"],
            ),
            ("退款问题", &["退款", "退钱", "不退", "退换", "取消订单", "不给退"]),
            (
                "商品质量",
                &["质量", "不好", "差", "不符合", "假货", "不如描述", "不如预期"],
            ),
            (
                "客服体验",
                &["客服", "服务", "态度", "回复", "沟通", "联系不上", "没人理"],
            ),
            (
                "账户问题",
                &["账户", "登录", "密码", "无法访问", "注册", "个人信息"],
            ),
            (
                "促销争议",
                &["优惠券", "折扣", "促销", "活动", "降价", "价格", "广告"],
            ),
            (
                "系统故障",
                &["网站", "App", "系统", "错误", "故障", "无法", "不能", "崩溃", "加载"],
            ),
        ];

        let categories = entries
            .iter()
            .map(|(name, keywords)| {
                let keywords: Vec<String> = keywords.iter().map(|k| k.to_string()).collect();
                Category {
                    name: name.to_string(),
                    folded: keywords.iter().map(|k| fold_case(k)).collect(),
                    keywords,
                }
            })
            .collect();

        Self { categories }
    }
}

impl Serialize for Taxonomy {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.categories.len()))?;
        for category in &self.categories {
            map.serialize_entry(&category.name, &category.keywords)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Taxonomy {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = Vec<(String, Vec<String>)>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of category name to keyword list")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, Vec<String>>()? {
                    entries.push(entry);
                }
                Ok(entries)
            }
        }

        let entries = deserializer.deserialize_map(EntriesVisitor)?;
        Taxonomy::new(entries).map_err(de::Error::custom)
    }
}

/// Taxonomy holder with hot-reload support
///
/// Readers take an `Arc<Taxonomy>` snapshot, so a reload never changes the
/// category set underneath an in-flight classification.
pub struct TaxonomyManager {
    current: RwLock<Arc<Taxonomy>>,
    source: Option<PathBuf>,
}

impl TaxonomyManager {
    pub fn new(taxonomy: Taxonomy) -> Self {
        Self {
            current: RwLock::new(Arc::new(taxonomy)),
            source: None,
        }
    }

    /// Load from file and remember the path for `reload()`
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let taxonomy = Taxonomy::from_file(path)?;
        Ok(Self {
            current: RwLock::new(Arc::new(taxonomy)),
            source: Some(path.to_path_buf()),
        })
    }

    /// Current taxonomy
    pub fn snapshot(&self) -> Arc<Taxonomy> {
        Arc::clone(&self.current.read())
    }

    /// Re-read the source file; the previous taxonomy stays on failure
    pub fn reload(&self) -> Result<(), ConfigError> {
        let path = self
            .source
            .as_ref()
            .ok_or_else(|| ConfigError::MissingField("taxonomy source path".to_string()))?;

        match Taxonomy::from_file(path) {
            Ok(taxonomy) => {
                *self.current.write() = Arc::new(taxonomy);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, path = %path.display(), "Taxonomy reload failed, keeping previous");
                Err(e)
            }
        }
    }

    /// Replace the taxonomy
    pub fn update(&self, taxonomy: Taxonomy) {
        *self.current.write() = Arc::new(taxonomy);
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}

impl Default for TaxonomyManager {
    fn default() -> Self {
        Self::new(Taxonomy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_taxonomy() {
        let taxonomy = Taxonomy::default();
        assert_eq!(taxonomy.len(), 8);
        assert_eq!(taxonomy.categories()[0].name(), "物流延迟");
        assert_eq!(taxonomy.categories()[7].name(), "系统故障");
        assert!(taxonomy
            .get("系统故障")
            .unwrap()
            .folded_keywords()
            .contains(&"app".to_string()));
    }

    #[test]
    fn test_shipped_taxonomy_file_matches_builtin() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../config/taxonomy.yaml");
        assert_eq!(Taxonomy::from_file(path).unwrap(), Taxonomy::default());
    }

    #[test]
    fn test_json_preserves_document_order() {
        let taxonomy =
            Taxonomy::from_json_str(r#"{"zeta": ["z"], "alpha": ["a"], "mid": ["m"]}"#).unwrap();
        assert_eq!(taxonomy.names(), vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_yaml_preserves_document_order() {
        let taxonomy = Taxonomy::from_yaml_str("商品损坏: [损坏]\n物流延迟: [延迟, 物流]\n").unwrap();
        assert_eq!(taxonomy.names(), vec!["商品损坏", "物流延迟"]);
    }

    #[test]
    fn test_rejects_malformed_taxonomy() {
        assert!(Taxonomy::from_json_str("{}").is_err());
        assert!(Taxonomy::from_json_str(r#"{"a": []}"#).is_err());
        assert!(Taxonomy::from_json_str(r#"{"a": ["  "]}"#).is_err());
        assert!(Taxonomy::from_json_str(r#"{"": ["x"]}"#).is_err());
        assert!(Taxonomy::from_json_str(r#"{"a": ["x"], "a": ["y"]}"#).is_err());
        assert!(Taxonomy::from_json_str(r#"["a", "b"]"#).is_err());
    }

    #[test]
    fn test_duplicate_keywords_collapse() {
        let taxonomy = Taxonomy::new([("a", vec!["Delay", "delay", "late"])]).unwrap();
        let category = taxonomy.get("a").unwrap();
        assert_eq!(category.keywords(), &["Delay".to_string(), "late".to_string()]);
        assert_eq!(category.folded_keywords(), &["delay".to_string(), "late".to_string()]);
    }

    #[test]
    fn test_serialize_round_trips_order() {
        let taxonomy = Taxonomy::new([("b", vec!["x"]), ("a", vec!["y"])]).unwrap();
        let json = serde_json::to_string(&taxonomy).unwrap();
        assert_eq!(json, r#"{"b":["x"],"a":["y"]}"#);
    }

    #[test]
    fn test_file_not_found() {
        let err = Taxonomy::from_file("/nonexistent/taxonomy.json").unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }

    #[test]
    fn test_manager_reload() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"a": ["x"]}}"#).unwrap();
        file.flush().unwrap();

        let manager = TaxonomyManager::from_file(file.path()).unwrap();
        let before = manager.snapshot();
        assert_eq!(before.names(), vec!["a"]);

        std::fs::write(file.path(), r#"{"b": ["y"], "c": ["z"]}"#).unwrap();
        manager.reload().unwrap();
        assert_eq!(manager.snapshot().names(), vec!["b", "c"]);
        // Earlier snapshots are unaffected
        assert_eq!(before.names(), vec!["a"]);
    }

    #[test]
    fn test_manager_failed_reload_keeps_previous() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "a: [x]").unwrap();
        file.flush().unwrap();

        let manager = TaxonomyManager::from_file(file.path()).unwrap();
        std::fs::write(file.path(), "a: []\n").unwrap();

        assert!(manager.reload().is_err());
        assert_eq!(manager.snapshot().names(), vec!["a"]);
    }

    #[test]
    fn test_manager_without_source_cannot_reload() {
        let manager = TaxonomyManager::default();
        assert!(manager.source().is_none());
        assert!(matches!(manager.reload(), Err(ConfigError::MissingField(_))));
    }
}
