use crate::core::geo::great_circle_distance_km;
use crate::domain::model::{CustomerMap, GeoPoint, InviteMap};
use crate::utils::error::Result;
use crate::utils::validation::{validate_coordinates, validate_positive_distance};

#[derive(Debug, Clone, Copy)]
pub struct DistanceFilter {
    office: GeoPoint,
    threshold_km: f64,
}

impl DistanceFilter {
    pub fn new(office: GeoPoint, threshold_km: f64) -> Result<Self> {
        validate_coordinates("office", &office)?;
        validate_positive_distance("distance", threshold_km)?;
        Ok(Self {
            office,
            threshold_km,
        })
    }

    pub fn office(&self) -> GeoPoint {
        self.office
    }

    pub fn threshold_km(&self) -> f64 {
        self.threshold_km
    }

    /// 距離門檻為開區間：剛好等於門檻的客戶不會被邀請
    pub fn apply(&self, customers: &CustomerMap) -> InviteMap {
        let mut invites = InviteMap::new();

        for (id, customer) in customers {
            let distance = great_circle_distance_km(&customer.location, &self.office);
            if distance < self.threshold_km {
                tracing::debug!(
                    "Customer {} is within the given distance ({:.3} km)",
                    id,
                    distance
                );
                invites.insert(id.clone(), customer.name.clone());
            } else {
                tracing::debug!("Customer {} is too far away ({:.3} km)", id, distance);
            }
        }

        invites
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{CustomerId, CustomerRecord};

    fn sample_customers() -> CustomerMap {
        [
            (1, "Alice Cahill", 51.92893, -10.27699),
            (2, "Ian McArdle", 51.8856167, -10.4240951),
            (12, "Christina McArdle", 52.986375, -6.043701),
        ]
        .into_iter()
        .map(|(id, name, lat, lon)| {
            let id = CustomerId::Numeric(id);
            (
                id.clone(),
                CustomerRecord {
                    id,
                    name: name.to_string(),
                    location: GeoPoint::new(lat, lon),
                },
            )
        })
        .collect()
    }

    fn ids(invites: &InviteMap) -> Vec<CustomerId> {
        invites.keys().cloned().collect()
    }

    #[test]
    fn test_filter_400km_keeps_everyone() {
        let filter = DistanceFilter::new(GeoPoint::DEFAULT_OFFICE, 400.0).unwrap();
        let invites = filter.apply(&sample_customers());

        assert_eq!(
            ids(&invites),
            vec![
                CustomerId::Numeric(1),
                CustomerId::Numeric(2),
                CustomerId::Numeric(12)
            ]
        );
        assert_eq!(invites[&CustomerId::Numeric(2)], "Ian McArdle");
    }

    #[test]
    fn test_filter_100km_keeps_only_nearby() {
        let filter = DistanceFilter::new(GeoPoint::DEFAULT_OFFICE, 100.0).unwrap();
        let invites = filter.apply(&sample_customers());

        assert_eq!(ids(&invites), vec![CustomerId::Numeric(12)]);
        assert_eq!(invites[&CustomerId::Numeric(12)], "Christina McArdle");
    }

    #[test]
    fn test_filter_30km_keeps_nobody() {
        let filter = DistanceFilter::new(GeoPoint::DEFAULT_OFFICE, 30.0).unwrap();
        assert!(filter.apply(&sample_customers()).is_empty());
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let customers: CustomerMap = sample_customers()
            .into_iter()
            .filter(|(id, _)| *id == CustomerId::Numeric(12))
            .collect();
        let location = customers[&CustomerId::Numeric(12)].location;
        let exact = great_circle_distance_km(&location, &GeoPoint::DEFAULT_OFFICE);

        let at_boundary = DistanceFilter::new(GeoPoint::DEFAULT_OFFICE, exact).unwrap();
        assert!(at_boundary.apply(&customers).is_empty());

        let just_above = DistanceFilter::new(GeoPoint::DEFAULT_OFFICE, exact + 1e-9).unwrap();
        assert_eq!(ids(&just_above.apply(&customers)), vec![CustomerId::Numeric(12)]);
    }

    #[test]
    fn test_custom_office() {
        let office = GeoPoint::new(51.92893, -10.27699);
        let filter = DistanceFilter::new(office, 20.0).unwrap();
        let invites = filter.apply(&sample_customers());

        assert_eq!(ids(&invites), vec![CustomerId::Numeric(1), CustomerId::Numeric(2)]);
    }

    #[test]
    fn test_invalid_threshold_rejected() {
        assert!(DistanceFilter::new(GeoPoint::DEFAULT_OFFICE, 0.0).is_err());
        assert!(DistanceFilter::new(GeoPoint::DEFAULT_OFFICE, -1.0).is_err());
        assert!(DistanceFilter::new(GeoPoint::DEFAULT_OFFICE, f64::NAN).is_err());
        assert!(DistanceFilter::new(GeoPoint::new(91.0, 0.0), 100.0).is_err());
    }
}
