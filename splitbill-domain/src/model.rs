use std::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign, Mul, Sub},
};

use fxhash::FxHashSet;
use indexmap::IndexMap;
use rust_decimal::Decimal;
use thiserror::Error;

/// Monetary amount kept at full decimal precision.
///
/// Rounding to the display unit happens only in
/// [`crate::services::display_rounding`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn from_decimal(value: Decimal) -> Self {
        Self(value)
    }

    pub fn from_i64(value: i64) -> Self {
        Self(Decimal::from(value))
    }

    /// Builds an amount from integer minor units (cents).
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    pub fn as_decimal(self) -> Decimal {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    pub fn is_negative(self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    pub fn abs(self) -> Self {
        Self(self.0.abs())
    }

    /// Even share of this amount across `parts` people, `None` for zero parts.
    pub fn split(self, parts: usize) -> Option<Self> {
        if parts == 0 {
            return None;
        }
        self.0.checked_div(Decimal::from(parts)).map(Self)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl Mul<Decimal> for Money {
    type Output = Self;

    fn mul(self, rhs: Decimal) -> Self::Output {
        Self(self.0 * rhs)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Item {
    pub name: String,
    pub price: Money,
}

impl Item {
    pub fn new(name: impl Into<String>, price: Money) -> Self {
        Self {
            name: name.into(),
            price,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ReceiptBuildError {
    #[error("item name must not be empty")]
    EmptyName,
    #[error("item '{name}' appears more than once")]
    DuplicateItem { name: String },
    #[error("item '{name}' has a negative price ({price})")]
    NegativePrice { name: String, price: Money },
    #[error("item '{name}' costs {price}, above the supported maximum of {max}")]
    PriceTooLarge {
        name: String,
        price: Money,
        max: Money,
    },
}

/// Line items of one receipt, unique by name, in receipt order.
///
/// Prices are capped at [`Receipt::MAX_ITEM_PRICE`] so that subtotals and
/// surcharged amounts stay far inside `Decimal` range.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Receipt {
    items: IndexMap<String, Money>,
}

impl Receipt {
    /// One trillion.
    pub const MAX_ITEM_PRICE: Money = Money(Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0));

    pub fn new() -> Self {
        Self::default()
    }

    pub fn try_from_items<I>(items: I) -> Result<Self, ReceiptBuildError>
    where
        I: IntoIterator<Item = Item>,
    {
        let mut receipt = Self::new();
        for item in items {
            receipt.push(item)?;
        }
        Ok(receipt)
    }

    pub fn push(&mut self, item: Item) -> Result<(), ReceiptBuildError> {
        if item.name.trim().is_empty() {
            return Err(ReceiptBuildError::EmptyName);
        }
        if item.price.is_negative() {
            return Err(ReceiptBuildError::NegativePrice {
                name: item.name,
                price: item.price,
            });
        }
        if item.price > Self::MAX_ITEM_PRICE {
            return Err(ReceiptBuildError::PriceTooLarge {
                name: item.name,
                price: item.price,
                max: Self::MAX_ITEM_PRICE,
            });
        }
        if self.items.contains_key(&item.name) {
            return Err(ReceiptBuildError::DuplicateItem { name: item.name });
        }
        self.items.insert(item.name, item.price);
        Ok(())
    }

    pub fn price_of(&self, name: &str) -> Option<Money> {
        self.items.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.items.contains_key(name)
    }

    pub fn remove_item(&mut self, name: &str) -> Option<Item> {
        self.items
            .shift_remove_entry(name)
            .map(|(name, price)| Item { name, price })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Money)> + '_ {
        self.items.iter().map(|(name, price)| (name.as_str(), *price))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn subtotal(&self) -> Money {
        self.items.values().sum()
    }
}

/// Members sharing one item. Kept sorted and free of duplicates.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemberSet {
    members: Vec<String>,
}

impl MemberSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::new();
        for name in names {
            set.insert(name);
        }
        set
    }

    /// Returns `false` when the member was already present.
    pub fn insert(&mut self, member: impl Into<String>) -> bool {
        let member = member.into();
        match self.members.binary_search(&member) {
            Ok(_) => false,
            Err(idx) => {
                self.members.insert(idx, member);
                true
            }
        }
    }

    pub fn remove(&mut self, member: &str) -> bool {
        match self.members.binary_search_by(|m| m.as_str().cmp(member)) {
            Ok(idx) => {
                self.members.remove(idx);
                true
            }
            Err(_) => false,
        }
    }

    /// Adds the member if absent, removes it otherwise. Returns whether the
    /// member is present afterwards.
    pub fn toggle(&mut self, member: &str) -> bool {
        if self.remove(member) {
            false
        } else {
            self.insert(member);
            true
        }
    }

    pub fn contains(&self, member: &str) -> bool {
        self.members
            .binary_search_by(|m| m.as_str().cmp(member))
            .is_ok()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.members.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Item name to the members sharing it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Assignment {
    items: IndexMap<String, MemberSet>,
}

impl Assignment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn assign(&mut self, item: &str, member: impl Into<String>) -> bool {
        self.entry(item).insert(member)
    }

    pub fn toggle(&mut self, item: &str, member: &str) -> bool {
        self.entry(item).toggle(member)
    }

    pub fn members_of(&self, item: &str) -> Option<&MemberSet> {
        self.items.get(item)
    }

    pub fn remove_item(&mut self, item: &str) -> Option<MemberSet> {
        self.items.shift_remove(item)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MemberSet)> + '_ {
        self.items
            .iter()
            .map(|(item, members)| (item.as_str(), members))
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn entry(&mut self, item: &str) -> &mut MemberSet {
        self.items.entry(item.to_owned()).or_default()
    }
}

impl<S: Into<String>> FromIterator<(S, MemberSet)> for Assignment {
    fn from_iter<T: IntoIterator<Item = (S, MemberSet)>>(iter: T) -> Self {
        Self {
            items: iter
                .into_iter()
                .map(|(item, members)| (item.into(), members))
                .collect(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct SurchargeFlags {
    pub gst: bool,
    pub service_charge: bool,
}

impl SurchargeFlags {
    pub fn new(gst: bool, service_charge: bool) -> Self {
        Self {
            gst,
            service_charge,
        }
    }

    pub fn none() -> Self {
        Self::default()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SurchargeRateError {
    #[error("{kind} rate must not be negative (found {rate})")]
    Negative { kind: &'static str, rate: Decimal },
    #[error("{kind} rate must not exceed 1 (found {rate})")]
    TooLarge { kind: &'static str, rate: Decimal },
}

/// Percentage uplifts, as fractions (`0.09` for 9%), between 0 and 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SurchargeRates {
    gst: Decimal,
    service_charge: Decimal,
}

impl Default for SurchargeRates {
    fn default() -> Self {
        Self {
            gst: Decimal::new(9, 2),
            service_charge: Decimal::new(10, 2),
        }
    }
}

impl SurchargeRates {
    pub fn try_new(gst: Decimal, service_charge: Decimal) -> Result<Self, SurchargeRateError> {
        Ok(Self {
            gst: check_rate("GST", gst)?,
            service_charge: check_rate("service charge", service_charge)?,
        })
    }

    pub fn gst(&self) -> Decimal {
        self.gst
    }

    pub fn service_charge(&self) -> Decimal {
        self.service_charge
    }

    /// Applies the enabled surcharges: GST on the base amount first, then
    /// service charge on the GST-inclusive amount.
    pub fn apply(&self, amount: Money, flags: SurchargeFlags) -> Money {
        let mut amount = amount;
        if flags.gst {
            amount = amount * (Decimal::ONE + self.gst);
        }
        if flags.service_charge {
            amount = amount * (Decimal::ONE + self.service_charge);
        }
        amount
    }
}

fn check_rate(kind: &'static str, rate: Decimal) -> Result<Decimal, SurchargeRateError> {
    if rate.is_sign_negative() && !rate.is_zero() {
        return Err(SurchargeRateError::Negative { kind, rate });
    }
    if rate > Decimal::ONE {
        return Err(SurchargeRateError::TooLarge { kind, rate });
    }
    Ok(rate)
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RosterError {
    #[error("member name must not be empty")]
    EmptyName,
    #[error("at least one payee is required")]
    NoPayees,
    #[error("payee '{name}' is listed more than once")]
    DuplicatePayee { name: String },
    #[error("'{name}' cannot be both payer and payee")]
    PayerIsPayee { name: String },
}

/// One payer and the payees who owe them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Roster {
    payer: String,
    payees: Vec<String>,
}

impl Roster {
    pub fn try_new<I, S>(payer: &str, payees: I) -> Result<Self, RosterError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let payer = payer.trim();
        if payer.is_empty() {
            return Err(RosterError::EmptyName);
        }

        let mut seen = FxHashSet::default();
        let mut validated = Vec::new();
        for payee in payees {
            let name = payee.as_ref().trim();
            if name.is_empty() {
                return Err(RosterError::EmptyName);
            }
            if name == payer {
                return Err(RosterError::PayerIsPayee {
                    name: name.to_owned(),
                });
            }
            if !seen.insert(name.to_owned()) {
                return Err(RosterError::DuplicatePayee {
                    name: name.to_owned(),
                });
            }
            validated.push(name.to_owned());
        }

        if validated.is_empty() {
            return Err(RosterError::NoPayees);
        }

        Ok(Self {
            payer: payer.to_owned(),
            payees: validated,
        })
    }

    pub fn payer(&self) -> &str {
        &self.payer
    }

    pub fn payees(&self) -> &[String] {
        &self.payees
    }

    pub fn is_payer(&self, name: &str) -> bool {
        self.payer == name
    }

    pub fn is_payee(&self, name: &str) -> bool {
        self.payees.iter().any(|payee| payee == name)
    }

    pub fn is_member(&self, name: &str) -> bool {
        self.is_payer(name) || self.is_payee(name)
    }

    /// Payer first, then payees in roster order.
    pub fn members(&self) -> impl Iterator<Item = &str> + '_ {
        std::iter::once(self.payer.as_str()).chain(self.payees.iter().map(String::as_str))
    }

    pub fn member_count(&self) -> usize {
        self.payees.len() + 1
    }
}

/// Amount each payee owes the payer, in roster order. Never keyed by the payer.
pub type OwedAmounts<'a> = IndexMap<&'a str, Money>;

/// Snapshot handed to the calculators. The caller owns the mutable state.
#[derive(Clone, Copy, Debug)]
pub struct SplitInput<'a> {
    pub receipt: &'a Receipt,
    pub assignment: &'a Assignment,
    pub flags: SurchargeFlags,
    pub roster: &'a Roster,
}
