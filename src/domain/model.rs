use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// 客戶編號。JSON 數字視為數字編號，字串保留原文。
///
/// 排序：所有數字編號排在文字編號之前；數字依數值比較，文字依字典序比較。
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CustomerId {
    Numeric(i128),
    Text(String),
}

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CustomerId::Numeric(id) => write!(f, "{}", id),
            CustomerId::Text(id) => f.write_str(id),
        }
    }
}

struct CustomerIdVisitor;

impl<'de> Visitor<'de> for CustomerIdVisitor {
    type Value = CustomerId;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an integer, an integral number or a string")
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<CustomerId, E> {
        Ok(CustomerId::Numeric(value.into()))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<CustomerId, E> {
        Ok(CustomerId::Numeric(value.into()))
    }

    // 7.0 與 7 是同一個編號；帶小數的編號不接受
    fn visit_f64<E: de::Error>(self, value: f64) -> Result<CustomerId, E> {
        if value.is_finite() && value.fract() == 0.0 && value.abs() < i128::MAX as f64 {
            Ok(CustomerId::Numeric(value as i128))
        } else {
            Err(E::custom(format!("user_id {} is not an integer", value)))
        }
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<CustomerId, E> {
        Ok(CustomerId::Text(value.to_string()))
    }

    fn visit_string<E: de::Error>(self, value: String) -> Result<CustomerId, E> {
        Ok(CustomerId::Text(value))
    }
}

impl<'de> Deserialize<'de> for CustomerId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(CustomerIdVisitor)
    }
}

impl From<&str> for CustomerId {
    fn from(id: &str) -> Self {
        CustomerId::Text(id.to_string())
    }
}

/// 經緯度（度）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    /// Dublin office used when no other location is configured.
    pub const DEFAULT_OFFICE: GeoPoint = GeoPoint::new(53.339428, -6.257664);

    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl Default for GeoPoint {
    fn default() -> Self {
        Self::DEFAULT_OFFICE
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CustomerRecord {
    pub id: CustomerId,
    pub name: String,
    pub location: GeoPoint,
}

pub type CustomerMap = BTreeMap<CustomerId, CustomerRecord>;

/// 距離篩選的結果：編號 -> 姓名
pub type InviteMap = BTreeMap<CustomerId, String>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InviteEntry {
    pub id: CustomerId,
    pub name: String,
}

/// Customers to invite, ascending by id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InviteList {
    entries: Vec<InviteEntry>,
}

impl InviteList {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// BTreeMap 已依編號排序且鍵唯一
impl From<InviteMap> for InviteList {
    fn from(invites: InviteMap) -> Self {
        Self {
            entries: invites
                .into_iter()
                .map(|(id, name)| InviteEntry { id, name })
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a InviteList {
    type Item = &'a InviteEntry;
    type IntoIter = std::slice::Iter<'a, InviteEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// What to do when a `user_id` shows up on more than one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Fail the parse.
    #[default]
    Reject,
    /// Keep the last occurrence.
    Overwrite,
}

impl fmt::Display for DuplicatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DuplicatePolicy::Reject => f.write_str("reject"),
            DuplicatePolicy::Overwrite => f.write_str("overwrite"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub invites: InviteList,
    pub rendered: String,
    pub customers_considered: usize,
}
