use serde::{Deserialize, Serialize};

/// Health plan tiers selectable during open enrollment.
///
/// The per-paycheck premium for each tier lives in
/// [`TaxYearConfig::health_plan_costs`](crate::TaxYearConfig), not here;
/// premiums change yearly while the tier list is stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HealthPlan {
    #[serde(rename = "COVA Care")]
    CovaCare,
    #[serde(rename = "COVA Care + Expanded Dental")]
    CovaCareExpandedDental,
    #[serde(rename = "COVA Care + Dental + Vision")]
    CovaCareDentalVision,
    #[serde(rename = "COVA Care + OON + Full")]
    CovaCareOonFull,
    #[serde(rename = "COVA HealthAware")]
    CovaHealthAware,
    #[serde(rename = "COVA HealthAware + Dental + Vision")]
    CovaHealthAwareDentalVision,
    #[serde(rename = "COVA HDHP")]
    CovaHdhp,
    #[serde(rename = "Kaiser HMO")]
    KaiserHmo,
    #[serde(rename = "Sentara HMO")]
    SentaraHmo,
}

impl HealthPlan {
    /// Every selectable tier.
    pub const ALL: [HealthPlan; 9] = [
        Self::CovaCare,
        Self::CovaCareExpandedDental,
        Self::CovaCareDentalVision,
        Self::CovaCareOonFull,
        Self::CovaHealthAware,
        Self::CovaHealthAwareDentalVision,
        Self::CovaHdhp,
        Self::KaiserHmo,
        Self::SentaraHmo,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CovaCare => "COVA Care",
            Self::CovaCareExpandedDental => "COVA Care + Expanded Dental",
            Self::CovaCareDentalVision => "COVA Care + Dental + Vision",
            Self::CovaCareOonFull => "COVA Care + OON + Full",
            Self::CovaHealthAware => "COVA HealthAware",
            Self::CovaHealthAwareDentalVision => "COVA HealthAware + Dental + Vision",
            Self::CovaHdhp => "COVA HDHP",
            Self::KaiserHmo => "Kaiser HMO",
            Self::SentaraHmo => "Sentara HMO",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|plan| plan.as_str() == s)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parse_round_trips_every_tier() {
        for plan in HealthPlan::ALL {
            assert_eq!(HealthPlan::parse(plan.as_str()), Some(plan));
        }
    }

    #[test]
    fn parse_rejects_unknown_tier() {
        assert_eq!(HealthPlan::parse("COVA Platinum"), None);
    }

    #[test]
    fn serde_uses_display_names() {
        let json = serde_json::to_string(&HealthPlan::CovaHdhp).unwrap();

        assert_eq!(json, "\"COVA HDHP\"");
        assert_eq!(
            serde_json::from_str::<HealthPlan>("\"Kaiser HMO\"").unwrap(),
            HealthPlan::KaiserHmo
        );
    }
}
