//! # Markup Rules
//!
//! Per-provider, per-user-type pricing adjustments.
//!
//! A [`MarkupRule`] holds, for each contract term, an additive amount and a
//! percentage markup for each of the two cost components. Any of the four
//! values may be absent. Lookups are keyed by
//! `(ContractTerm, CostComponent, AdjustmentKind)`.
//!
//! Markup tables store these values in flat columns named
//! `{component}_{kind}_{n}yr` (e.g. `rental_markup_3yr`); [`MarkupField`]
//! parses and renders those names at the storage boundary.
//!
//! # Examples
//!
//! ```
//! use provider_gateway::domain::entities::{AdjustmentKind, CostComponent, MarkupRule};
//! use provider_gateway::domain::value_objects::{ContractTerm, ProviderId, UserType};
//! use rust_decimal::Decimal;
//!
//! let one_year = ContractTerm::new(1).unwrap();
//! let rule = MarkupRule::new(UserType::new(3), ProviderId::new("neos")).with_adjustment(
//!     one_year,
//!     CostComponent::Connection,
//!     AdjustmentKind::Addition,
//!     Decimal::new(10, 0),
//! );
//!
//! assert!(rule.applies_to(one_year));
//! assert!(!rule.applies_to(ContractTerm::new(3).unwrap()));
//! ```

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::{
    CheckedArithmetic, ContractTerm, ProviderId, UserType, percentage_factor,
};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Cost component a markup adjusts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CostComponent {
    /// One-off connection cost.
    Connection,
    /// Recurring rental cost.
    Rental,
}

impl CostComponent {
    /// Both components.
    pub const ALL: [Self; 2] = [Self::Connection, Self::Rental];

    /// Returns the column-name prefix for this component.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Connection => "connection",
            Self::Rental => "rental",
        }
    }
}

impl fmt::Display for CostComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of adjustment applied to a cost component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AdjustmentKind {
    /// Fixed amount added to the cost.
    Addition,
    /// Percentage applied after the addition.
    Markup,
}

impl AdjustmentKind {
    /// Both kinds.
    pub const ALL: [Self; 2] = [Self::Addition, Self::Markup];

    /// Returns the column-name infix for this kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Addition => "addition",
            Self::Markup => "markup",
        }
    }
}

impl fmt::Display for AdjustmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Adjustments for one cost component at one term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ComponentAdjustment {
    /// Amount added to the base cost.
    pub addition: Option<Decimal>,
    /// Percentage applied to `base + addition`.
    pub markup_percent: Option<Decimal>,
}

impl ComponentAdjustment {
    /// Returns true if neither value is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.addition.is_none() && self.markup_percent.is_none()
    }

    /// Returns the value for `kind`.
    #[must_use]
    pub fn get(&self, kind: AdjustmentKind) -> Option<Decimal> {
        match kind {
            AdjustmentKind::Addition => self.addition,
            AdjustmentKind::Markup => self.markup_percent,
        }
    }

    fn set(&mut self, kind: AdjustmentKind, value: Option<Decimal>) {
        match kind {
            AdjustmentKind::Addition => self.addition = value,
            AdjustmentKind::Markup => self.markup_percent = value,
        }
    }

    /// Computes `(base + addition) * (1 + markup_percent / 100)`.
    ///
    /// An absent value contributes its identity (zero addition, zero
    /// percent).
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Arithmetic` on overflow.
    pub fn apply(&self, base: Decimal) -> DomainResult<Decimal> {
        let with_addition = base.safe_add(self.addition.unwrap_or(Decimal::ZERO))?;
        let factor = percentage_factor(self.markup_percent.unwrap_or(Decimal::ZERO))?;
        Ok(with_addition.safe_mul(factor)?)
    }
}

/// All adjustments for one contract term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TermMarkup {
    /// Connection cost adjustments.
    pub connection: ComponentAdjustment,
    /// Rental cost adjustments.
    pub rental: ComponentAdjustment,
}

impl TermMarkup {
    /// Returns true if at least one of the four values is set.
    #[must_use]
    pub fn is_applicable(&self) -> bool {
        !self.connection.is_empty() || !self.rental.is_empty()
    }

    /// Returns the adjustments for `component`.
    #[must_use]
    pub fn component(&self, component: CostComponent) -> &ComponentAdjustment {
        match component {
            CostComponent::Connection => &self.connection,
            CostComponent::Rental => &self.rental,
        }
    }

    fn component_mut(&mut self, component: CostComponent) -> &mut ComponentAdjustment {
        match component {
            CostComponent::Connection => &mut self.connection,
            CostComponent::Rental => &mut self.rental,
        }
    }
}

/// A single markup column: `{component}_{kind}_{term}`.
///
/// # Examples
///
/// ```
/// use provider_gateway::domain::entities::{AdjustmentKind, CostComponent, MarkupField};
///
/// let field: MarkupField = "rental_markup_3yr".parse().unwrap();
/// assert_eq!(field.component, CostComponent::Rental);
/// assert_eq!(field.kind, AdjustmentKind::Markup);
/// assert_eq!(field.term.years(), 3);
/// assert_eq!(field.to_string(), "rental_markup_3yr");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarkupField {
    /// Cost component.
    pub component: CostComponent,
    /// Adjustment kind.
    pub kind: AdjustmentKind,
    /// Contract term.
    pub term: ContractTerm,
}

impl FromStr for MarkupField {
    type Err = DomainError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let invalid = || DomainError::invalid_markup_field(name.to_string());

        let mut parts = name.splitn(3, '_');
        let component = match parts.next() {
            Some("connection") => CostComponent::Connection,
            Some("rental") => CostComponent::Rental,
            _ => return Err(invalid()),
        };
        let kind = match parts.next() {
            Some("addition") => AdjustmentKind::Addition,
            Some("markup") => AdjustmentKind::Markup,
            _ => return Err(invalid()),
        };
        let years = parts
            .next()
            .and_then(|term| term.strip_suffix("yr"))
            .and_then(|years| years.parse::<u32>().ok())
            .ok_or_else(invalid)?;

        Ok(Self {
            component,
            kind,
            term: ContractTerm::new(years)?,
        })
    }
}

impl fmt::Display for MarkupField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}_{}", self.component, self.kind, self.term)
    }
}

/// Markup rule for one `(user_type, supplier_id)` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupRule {
    /// User type the rule applies to.
    user_type: UserType,
    /// Provider the rule applies to.
    supplier_id: ProviderId,
    /// Adjustments by term.
    terms: BTreeMap<ContractTerm, TermMarkup>,
}

impl MarkupRule {
    /// Creates a rule without adjustments.
    #[must_use]
    pub fn new(user_type: UserType, supplier_id: ProviderId) -> Self {
        Self {
            user_type,
            supplier_id,
            terms: BTreeMap::new(),
        }
    }

    /// Builds a rule from flat `(column name, value)` pairs.
    ///
    /// Columns that are not markup fields (ids, timestamps, ...) are
    /// ignored.
    #[must_use]
    pub fn from_fields<I, S>(user_type: UserType, supplier_id: ProviderId, fields: I) -> Self
    where
        I: IntoIterator<Item = (S, Option<Decimal>)>,
        S: AsRef<str>,
    {
        fields
            .into_iter()
            .filter_map(|(name, value)| {
                name.as_ref()
                    .parse::<MarkupField>()
                    .ok()
                    .map(|field| (field, value))
            })
            .fold(Self::new(user_type, supplier_id), |mut rule, (field, value)| {
                rule.set(field.term, field.component, field.kind, value);
                rule
            })
    }

    /// Sets one adjustment value.
    #[must_use]
    pub fn with_adjustment(
        mut self,
        term: ContractTerm,
        component: CostComponent,
        kind: AdjustmentKind,
        value: Decimal,
    ) -> Self {
        self.set(term, component, kind, Some(value));
        self
    }

    /// Sets or clears one adjustment value.
    pub fn set(
        &mut self,
        term: ContractTerm,
        component: CostComponent,
        kind: AdjustmentKind,
        value: Option<Decimal>,
    ) {
        self.terms
            .entry(term)
            .or_default()
            .component_mut(component)
            .set(kind, value);
    }

    /// Returns one adjustment value.
    #[must_use]
    pub fn get(
        &self,
        term: ContractTerm,
        component: CostComponent,
        kind: AdjustmentKind,
    ) -> Option<Decimal> {
        self.terms.get(&term)?.component(component).get(kind)
    }

    /// Returns the adjustments for `term`, if the rule has any.
    #[must_use]
    pub fn term_markup(&self, term: ContractTerm) -> Option<&TermMarkup> {
        self.terms
            .get(&term)
            .filter(|markup| markup.is_applicable())
    }

    /// Returns true if at least one value is set for `term`.
    #[must_use]
    pub fn applies_to(&self, term: ContractTerm) -> bool {
        self.term_markup(term).is_some()
    }

    /// Returns the user type.
    #[inline]
    #[must_use]
    pub fn user_type(&self) -> UserType {
        self.user_type
    }

    /// Returns the supplier (provider) id.
    #[inline]
    #[must_use]
    pub fn supplier_id(&self) -> &ProviderId {
        &self.supplier_id
    }

    /// Returns the flat `(field, value)` view, ordered by term.
    #[must_use]
    pub fn fields(&self) -> Vec<(MarkupField, Option<Decimal>)> {
        self.terms
            .iter()
            .flat_map(|(term, markup)| {
                CostComponent::ALL.into_iter().flat_map(move |component| {
                    AdjustmentKind::ALL.into_iter().map(move |kind| {
                        (
                            MarkupField {
                                component,
                                kind,
                                term: *term,
                            },
                            markup.component(component).get(kind),
                        )
                    })
                })
            })
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn term(years: u32) -> ContractTerm {
        ContractTerm::new(years).unwrap()
    }

    mod markup_field {
        use super::*;

        #[test]
        fn parses_all_combinations() {
            for component in CostComponent::ALL {
                for kind in AdjustmentKind::ALL {
                    let name = format!("{}_{}_5yr", component, kind);
                    let field: MarkupField = name.parse().unwrap();
                    assert_eq!(field.component, component);
                    assert_eq!(field.kind, kind);
                    assert_eq!(field.term, term(5));
                    assert_eq!(field.to_string(), name);
                }
            }
        }

        #[test]
        fn rejects_other_columns() {
            assert!("user_type".parse::<MarkupField>().is_err());
            assert!("connection_addition".parse::<MarkupField>().is_err());
            assert!("rental_markup_3".parse::<MarkupField>().is_err());
            assert!("rental_markup_0yr".parse::<MarkupField>().is_err());
            assert!("setup_markup_1yr".parse::<MarkupField>().is_err());
        }
    }

    mod component_adjustment {
        use super::*;

        #[test]
        fn applies_addition_then_percentage() {
            let adjustment = ComponentAdjustment {
                addition: Some(Decimal::new(10, 0)),
                markup_percent: Some(Decimal::new(10, 0)),
            };
            assert_eq!(
                adjustment.apply(Decimal::new(100, 0)).unwrap(),
                Decimal::new(121, 0)
            );
        }

        #[test]
        fn absent_values_are_identity() {
            let only_percent = ComponentAdjustment {
                addition: None,
                markup_percent: Some(Decimal::new(50, 0)),
            };
            assert_eq!(
                only_percent.apply(Decimal::new(10, 0)).unwrap(),
                Decimal::new(15, 0)
            );
            assert_eq!(
                ComponentAdjustment::default()
                    .apply(Decimal::new(7, 0))
                    .unwrap(),
                Decimal::new(7, 0)
            );
        }
    }

    mod markup_rule {
        use super::*;

        #[test]
        fn from_fields_ignores_unrelated_columns() {
            let rule = MarkupRule::from_fields(
                UserType::new(3),
                ProviderId::new("sky"),
                vec![
                    ("id", Some(Decimal::ONE)),
                    ("connection_addition_1yr", Some(Decimal::new(10, 0))),
                    ("rental_markup_1yr", Some(Decimal::new(20, 0))),
                    ("rental_markup_3yr", None),
                ],
            );

            assert_eq!(
                rule.get(term(1), CostComponent::Connection, AdjustmentKind::Addition),
                Some(Decimal::new(10, 0))
            );
            assert_eq!(
                rule.get(term(1), CostComponent::Rental, AdjustmentKind::Markup),
                Some(Decimal::new(20, 0))
            );
            assert!(rule.applies_to(term(1)));
            assert!(!rule.applies_to(term(3)));
        }

        #[test]
        fn unknown_term_is_not_applicable() {
            let rule = MarkupRule::new(UserType::new(1), ProviderId::new("bt"));
            assert!(!rule.applies_to(term(7)));
            assert!(
                rule.get(term(7), CostComponent::Rental, AdjustmentKind::Addition)
                    .is_none()
            );
        }

        #[test]
        fn clearing_all_values_makes_term_inapplicable() {
            let mut rule = MarkupRule::new(UserType::new(1), ProviderId::new("bt"))
                .with_adjustment(
                    term(2),
                    CostComponent::Rental,
                    AdjustmentKind::Addition,
                    Decimal::ONE,
                );
            assert!(rule.applies_to(term(2)));

            rule.set(term(2), CostComponent::Rental, AdjustmentKind::Addition, None);
            assert!(!rule.applies_to(term(2)));
        }

        #[test]
        fn fields_roundtrip_through_from_fields() {
            let rule = MarkupRule::new(UserType::new(2), ProviderId::new("its"))
                .with_adjustment(
                    term(1),
                    CostComponent::Connection,
                    AdjustmentKind::Markup,
                    Decimal::new(5, 0),
                )
                .with_adjustment(
                    term(3),
                    CostComponent::Rental,
                    AdjustmentKind::Addition,
                    Decimal::new(12, 0),
                );

            let flat: Vec<(String, Option<Decimal>)> = rule
                .fields()
                .into_iter()
                .map(|(field, value)| (field.to_string(), value))
                .collect();
            assert_eq!(flat.len(), 8);

            let rebuilt =
                MarkupRule::from_fields(rule.user_type(), rule.supplier_id().clone(), flat);
            assert_eq!(rebuilt, rule);
        }
    }
}
