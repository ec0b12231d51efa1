//! The cached resources and the table of which writes make which resources stale.

use std::{collections::BTreeSet, fmt::Display};

/// A summary resource cached by [crate::store::DashboardStore].
///
/// The declaration order is the order resources are refreshed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Resource {
    /// Counts of tenants, properties and overdue rentals, plus total earnings.
    DashboardSummary,
    /// Earnings, expenses, utilities, overdues and deposits.
    ChartSummary,
    /// Earnings and past-due amounts for a month or year.
    PaymentsSummary,
    /// Every rental.
    Rentals,
}

impl Resource {
    /// Every resource, in refresh order.
    pub const ALL: [Resource; 4] = [
        Resource::DashboardSummary,
        Resource::ChartSummary,
        Resource::PaymentsSummary,
        Resource::Rentals,
    ];
}

impl Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Resource::DashboardSummary => "dashboard summary",
            Resource::ChartSummary => "chart summary",
            Resource::PaymentsSummary => "payments summary",
            Resource::Rentals => "rentals",
        };

        f.write_str(name)
    }
}

/// A set of resources. Iterates in refresh order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceSet(BTreeSet<Resource>);

impl ResourceSet {
    /// Every resource.
    pub fn all() -> Self {
        Self::of(&Resource::ALL)
    }

    /// The set of `resources`, ignoring duplicates.
    pub fn of(resources: &[Resource]) -> Self {
        Self(resources.iter().copied().collect())
    }

    pub fn contains(&self, resource: Resource) -> bool {
        self.0.contains(&resource)
    }

    /// The resources in refresh order.
    pub fn iter(&self) -> impl Iterator<Item = Resource> + '_ {
        self.0.iter().copied()
    }
}

/// The kind of write made to a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    Add,
    Edit,
    Delete,
}

/// A write made through the remote API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Payment(Change),
    Utility(Change),
    Rental(Change),
    Expense(Change),
    Tenant(Change),
    Property(Change),
}

/// The resources that are stale after `mutation`.
pub fn invalidated_by(mutation: Mutation) -> ResourceSet {
    match mutation {
        Mutation::Payment(_) | Mutation::Utility(_) | Mutation::Rental(_) => ResourceSet::all(),
        Mutation::Expense(_) => {
            ResourceSet::of(&[Resource::ChartSummary, Resource::DashboardSummary])
        }
        Mutation::Tenant(_) | Mutation::Property(_) => {
            ResourceSet::of(&[Resource::DashboardSummary, Resource::Rentals])
        }
    }
}
