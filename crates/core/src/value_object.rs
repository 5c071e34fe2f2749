//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**: two `Gp(300)`
/// amounts are interchangeable, and a `PeriodKey` is equal to any other key
/// carrying the same marker. To "modify" one, build a new value.
///
/// The trait requires:
/// - **Clone**: value objects are cheap to copy
/// - **PartialEq**: compared by attribute values
/// - **Debug**: helpful for logging and assertions
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
