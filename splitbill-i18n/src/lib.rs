#[cfg(all(feature = "ja", feature = "en"))]
compile_error!("Cannot enable both 'ja' and 'en' features at the same time");

#[cfg(feature = "ja")]
pub mod strings {
    pub const ITEM: &str = "品目";
    pub const PRICE: &str = "金額";
    pub const SUBTOTAL: &str = "小計";
    pub const GST: &str = "GST";
    pub const SERVICE_CHARGE: &str = "サービス料";
    pub const TOTAL: &str = "合計";
    pub const UNASSIGNED: &str = "未割当";
    pub const NOBODY_OWES: &str = "支払いが必要なメンバーはいません。";
    pub const RETAKE_PHOTO: &str = "レシートを読み取れませんでした。もう一度撮影してください。";
    pub const BILL_CALCULATION_FAILED: &str = "精算の計算に失敗しました";
    pub const NAME_CANNOT_BE_EMPTY: &str = "名前を入力してください";
    pub const ADD_AT_LEAST_ONE_PAYEE: &str = "支払う人を一人以上追加してください";
}

#[cfg(feature = "en")]
pub mod strings {
    pub const ITEM: &str = "Item";
    pub const PRICE: &str = "Price";
    pub const SUBTOTAL: &str = "Subtotal";
    pub const GST: &str = "GST";
    pub const SERVICE_CHARGE: &str = "Service Charge";
    pub const TOTAL: &str = "Total";
    pub const UNASSIGNED: &str = "Unassigned";
    pub const NOBODY_OWES: &str = "Nobody owes anything.";
    pub const RETAKE_PHOTO: &str = "Could not read the receipt. Please retake the photo.";
    pub const BILL_CALCULATION_FAILED: &str = "Bill calculation failed";
    pub const NAME_CANNOT_BE_EMPTY: &str = "Name cannot be empty";
    pub const ADD_AT_LEAST_ONE_PAYEE: &str = "Please add at least one payee";
}

#[cfg(not(any(feature = "ja", feature = "en")))]
pub mod strings {
    pub const ITEM: &str = "Item";
    pub const PRICE: &str = "Price";
    pub const SUBTOTAL: &str = "Subtotal";
    pub const GST: &str = "GST";
    pub const SERVICE_CHARGE: &str = "Service Charge";
    pub const TOTAL: &str = "Total";
    pub const UNASSIGNED: &str = "Unassigned";
    pub const NOBODY_OWES: &str = "Nobody owes anything.";
    pub const RETAKE_PHOTO: &str = "Could not read the receipt. Please retake the photo.";
    pub const BILL_CALCULATION_FAILED: &str = "Bill calculation failed";
    pub const NAME_CANNOT_BE_EMPTY: &str = "Name cannot be empty";
    pub const ADD_AT_LEAST_ONE_PAYEE: &str = "Please add at least one payee";
}

pub use strings::*;

#[cfg(feature = "ja")]
pub fn owes(payee: impl std::fmt::Display, payer: impl std::fmt::Display, amount: &str) -> String {
    format!("{payee} は {payer} に ${amount} 支払います")
}

#[cfg(feature = "ja")]
pub fn name_already_exists(name: impl std::fmt::Display) -> String {
    format!("'{name}' は既に登録されています")
}

#[cfg(feature = "ja")]
pub fn payee_is_payer(name: impl std::fmt::Display) -> String {
    format!("'{name}' は支払者と同じです")
}

#[cfg(feature = "ja")]
pub fn unknown_item(name: impl std::fmt::Display) -> String {
    format!("品目 '{name}' はレシートにありません")
}

#[cfg(feature = "ja")]
pub fn unknown_member(name: impl std::fmt::Display) -> String {
    format!("'{name}' はメンバーではありません")
}

#[cfg(not(feature = "ja"))]
pub fn owes(payee: impl std::fmt::Display, payer: impl std::fmt::Display, amount: &str) -> String {
    format!("{payee} owes {payer} ${amount}")
}

#[cfg(not(feature = "ja"))]
pub fn name_already_exists(name: impl std::fmt::Display) -> String {
    format!("Name '{name}' already exists")
}

#[cfg(not(feature = "ja"))]
pub fn payee_is_payer(name: impl std::fmt::Display) -> String {
    format!("Payee '{name}' cannot be the same as payer")
}

#[cfg(not(feature = "ja"))]
pub fn unknown_item(name: impl std::fmt::Display) -> String {
    format!("Item '{name}' is not on the receipt")
}

#[cfg(not(feature = "ja"))]
pub fn unknown_member(name: impl std::fmt::Display) -> String {
    format!("'{name}' is not a member of this bill")
}
