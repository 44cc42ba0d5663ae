//! API response shapes for the bookkeeping server.
//!
//! DESIGN
//! ======
//! These types mirror the JSON the server returns so serde round-trips stay
//! lossless. They are pass-through contracts for the page layer; nothing in
//! this crate transforms them beyond small derived totals.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An authenticated user as returned by `GET /user`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// User identifier. Older servers send an integer; it is normalized to a string.
    #[serde(deserialize_with = "deserialize_id_from_string_or_number")]
    pub id: String,
    /// Display name.
    pub name: String,
    /// Login email address.
    pub email: String,
}

/// A ledger book: the scope for account titles, transactions, and grants.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Book identifier, also the `slug` of book routes.
    pub book_id: String,
    /// Book title shown in the book list.
    pub name: String,
    /// Fiscal year the book covers.
    pub year: i32,
    /// Creation timestamp (RFC 3339).
    pub created_at: String,
    /// Last modification timestamp (RFC 3339).
    pub updated_at: String,
}

/// Ledger category of an account title.
///
/// Encoded on the wire as its index: 0 asset, 1 liability, 2 expense, 3 income.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AccountTitleType {
    Asset,
    Liability,
    Expense,
    Income,
}

impl AccountTitleType {
    pub const ALL: [Self; 4] = [Self::Asset, Self::Liability, Self::Expense, Self::Income];

    /// Localized display string shown in the UI.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Asset => "資産",
            Self::Liability => "負債",
            Self::Expense => "支出",
            Self::Income => "収入",
        }
    }

    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Self::Asset => 0,
            Self::Liability => 1,
            Self::Expense => 2,
            Self::Income => 3,
        }
    }

    #[must_use]
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(usize::from(code)).copied()
    }
}

impl Serialize for AccountTitleType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

impl<'de> Deserialize<'de> for AccountTitleType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = u8::deserialize(deserializer)?;
        Self::from_code(code).ok_or_else(|| D::Error::custom(format!("unknown account title type {code}")))
    }
}

/// A named account (ledger category) within a book.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountTitle {
    /// Account title identifier.
    pub title_id: i64,
    /// Owning book.
    pub book_id: String,
    /// Account name, e.g. "現金".
    pub name: String,
    /// Current balance.
    pub amount: i64,
    /// Opening balance carried into the book.
    pub amount_base: i64,
    /// Ledger category; `type` on the wire.
    #[serde(rename = "type")]
    pub kind: AccountTitleType,
    /// Creation timestamp (RFC 3339).
    pub created_at: String,
    /// Last modification timestamp (RFC 3339).
    pub updated_at: String,
}

/// Which side of the ledger a sub-transaction posts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntrySide {
    Debit,
    Credit,
}

/// One debit or credit leg of a double-entry transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubTransaction {
    /// Leg identifier.
    pub sub_transaction_id: i64,
    /// Account title this leg posts to.
    pub title_id: i64,
    /// Posted amount in the book's currency unit.
    pub amount: i64,
    /// Debit or credit.
    pub side: EntrySide,
}

/// A journal entry made of debit and credit legs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Journal entry identifier.
    pub transaction_id: i64,
    /// Owning book.
    pub book_id: String,
    /// Posting date (`YYYY-MM-DD`).
    pub date: String,
    /// Free-form memo. Empty when omitted.
    #[serde(default)]
    pub description: String,
    /// Debit and credit legs, in entry order.
    #[serde(default)]
    pub sub_transactions: Vec<SubTransaction>,
    /// Creation timestamp (RFC 3339).
    pub created_at: String,
    /// Last modification timestamp (RFC 3339).
    pub updated_at: String,
}

impl Transaction {
    #[must_use]
    pub fn debit_total(&self) -> i64 {
        self.side_total(EntrySide::Debit)
    }

    #[must_use]
    pub fn credit_total(&self) -> i64 {
        self.side_total(EntrySide::Credit)
    }

    /// True when debits and credits sum to the same amount.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.debit_total() == self.credit_total()
    }

    fn side_total(&self, side: EntrySide) -> i64 {
        self.sub_transactions
            .iter()
            .filter(|sub| sub.side == side)
            .map(|sub| sub.amount)
            .sum()
    }
}

/// Role granted to a user on a book.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookRole {
    Owner,
    Editor,
    Viewer,
}

impl BookRole {
    #[must_use]
    pub fn can_edit(self) -> bool {
        matches!(self, Self::Owner | Self::Editor)
    }
}

/// A user-to-book role grant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookAuthorization {
    /// Book the grant applies to.
    pub book_id: String,
    /// Grantee. Normalized to a string like [`User::id`].
    #[serde(deserialize_with = "deserialize_id_from_string_or_number")]
    pub user_id: String,
    /// Granted role.
    pub role: BookRole,
}

fn deserialize_id_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::String(id) => Ok(id),
        serde_json::Value::Number(number) => {
            if let Some(int) = number.as_i64() {
                return Ok(int.to_string());
            }
            if let Some(int) = number.as_u64() {
                return Ok(int.to_string());
            }
            Err(D::Error::custom("expected integer-compatible id"))
        }
        _ => Err(D::Error::custom("expected string or integer id")),
    }
}
