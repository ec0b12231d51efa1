//! Filtering, grouping and labelling shared by the list pages and the dashboard.
//!
//! Every function borrows the raw list and leaves it untouched.

use std::collections::BTreeMap;

use time::Date;

use crate::{
    property::{Property, PropertyStatus, RentalType},
    rental::{Rental, RentalStatus},
    tenant::{ActiveStatus, Renter},
};

/// The rentals with `status`, in their original order.
pub fn rentals_with_status<'a>(rentals: &'a [Rental], status: &RentalStatus) -> Vec<&'a Rental> {
    rentals
        .iter()
        .filter(|rental| &rental.status == status)
        .collect()
}

/// The tenants with `status`, or every tenant if `status` is `None`.
pub fn renters_with_status<'a>(
    renters: &'a [Renter],
    status: Option<&ActiveStatus>,
) -> Vec<&'a Renter> {
    renters
        .iter()
        .filter(|renter| status.is_none_or(|status| &renter.active_status == status))
        .collect()
}

/// The properties with `status`, or every property if `status` is `None`.
pub fn properties_with_status<'a>(
    properties: &'a [Property],
    status: Option<&PropertyStatus>,
) -> Vec<&'a Property> {
    properties
        .iter()
        .filter(|property| status.is_none_or(|status| &property.status == status))
        .collect()
}

/// Group `items` by date. Iterate the map in reverse for newest first.
///
/// Items without a date are left out.
pub fn group_by_date<'a, T>(
    items: &'a [T],
    date_of: impl Fn(&T) -> Option<Date>,
) -> BTreeMap<Date, Vec<&'a T>> {
    let mut groups: BTreeMap<Date, Vec<&T>> = BTreeMap::new();
    let mut skipped = 0;

    for item in items {
        match date_of(item) {
            Some(date) => groups.entry(date).or_default().push(item),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        tracing::debug!("Left {skipped} items without a valid date out of the grouping");
    }

    groups
}

pub fn total_amount<T>(items: &[T], amount_of: impl Fn(&T) -> f64) -> f64 {
    items.iter().map(amount_of).sum()
}

/// How long a rental lasts in units of its payment frequency, rounded up.
///
/// For example, 45 days paid monthly is "2 months".
pub fn rental_duration_label(start: Date, end: Date, frequency: &RentalType) -> String {
    let days = (end - start).whole_days().max(0);
    let periods = |period_days: i64| (days + period_days - 1) / period_days;

    match frequency {
        RentalType::Daily => format!("{days} days"),
        RentalType::Weekly => format!("{} weeks", periods(7)),
        RentalType::Monthly => format!("{} months", periods(30)),
        RentalType::Quarterly => format!("{} quarters", periods(90)),
        RentalType::Yearly => format!("{} years", periods(365)),
        RentalType::Other(_) => format!("{days} days"),
    }
}

/// The rentals with an outstanding balance.
pub fn rentals_with_dues(rentals: &[Rental]) -> Vec<&Rental> {
    rentals.iter().filter(|rental| rental.dues > 0.0).collect()
}

/// Up to `limit` current rentals, latest start date first.
pub fn latest_active_rentals(rentals: &[Rental], limit: usize) -> Vec<&Rental> {
    let mut active = rentals_with_status(rentals, &RentalStatus::Rented);
    active.sort_by(|a, b| b.rental_start_date.cmp(&a.rental_start_date));
    active.truncate(limit);

    active
}
