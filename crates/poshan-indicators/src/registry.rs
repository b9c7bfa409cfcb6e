//! Domain Registry
//!
//! Central registry of the domain analyzers. Allows lookup by domain key and
//! instantiation of the analyzer for a [`Domain`].

use crate::adolescent::AdolescentGirlsAnalyzer;
use crate::analyzer::DomainAnalyzer;
use crate::domain::Domain;
use crate::growth::{AgeBand, GrowthMonitoringAnalyzer};
use crate::maternal::{AnaemiaAnalyzer, LowBirthWeightAnalyzer, WeightGainAnalyzer};
use crate::nutrition::SnpAnalyzer;
use crate::service::{AwcSummaryAnalyzer, HomeVisitAnalyzer, MeasuringEfficiencyAnalyzer};
use std::collections::HashMap;

/// Thematic grouping of domains
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DomainCategory {
    /// Child growth monitoring
    Growth,
    /// Maternal and infant health
    Maternal,
    /// Adolescent girls
    Adolescent,
    /// Service delivery by centres and workers
    ServiceDelivery,
    /// Supplementary nutrition
    Nutrition,
}

/// Domain metadata
#[derive(Debug, Clone)]
pub struct DomainInfo {
    /// Domain
    pub domain: Domain,
    /// Domain category
    pub category: DomainCategory,
    /// What the domain's indicators measure
    pub description: &'static str,
    /// Fields computed by the analyzer
    pub derived_fields: &'static [&'static str],
}

/// Build the analyzer for `domain`.
pub fn analyzer_for(domain: Domain) -> Box<dyn DomainAnalyzer> {
    match domain {
        Domain::GrowthFiveToSix => Box::new(GrowthMonitoringAnalyzer::new(AgeBand::FiveToSix)),
        Domain::GrowthZeroToFive => Box::new(GrowthMonitoringAnalyzer::new(AgeBand::ZeroToFive)),
        Domain::Anaemia => Box::new(AnaemiaAnalyzer),
        Domain::LowBirthWeight => Box::new(LowBirthWeightAnalyzer),
        Domain::GestationalWeightGain => Box::new(WeightGainAnalyzer),
        Domain::AdolescentGirls => Box::new(AdolescentGirlsAnalyzer),
        Domain::MeasuringEfficiency => Box::new(MeasuringEfficiencyAnalyzer),
        Domain::HomeVisit => Box::new(HomeVisitAnalyzer),
        Domain::SnpProjections => Box::new(SnpAnalyzer),
        Domain::AwcSummary => Box::new(AwcSummaryAnalyzer),
    }
}

const fn category_of(domain: Domain) -> DomainCategory {
    match domain {
        Domain::GrowthFiveToSix | Domain::GrowthZeroToFive => DomainCategory::Growth,
        Domain::Anaemia | Domain::LowBirthWeight | Domain::GestationalWeightGain => {
            DomainCategory::Maternal
        }
        Domain::AdolescentGirls => DomainCategory::Adolescent,
        Domain::MeasuringEfficiency | Domain::HomeVisit | Domain::AwcSummary => {
            DomainCategory::ServiceDelivery
        }
        Domain::SnpProjections => DomainCategory::Nutrition,
    }
}

const fn description_of(domain: Domain) -> &'static str {
    match domain {
        Domain::GrowthFiveToSix => "Stunting, underweight and measurement coverage, 5-6 years",
        Domain::GrowthZeroToFive => "Stunting, underweight and measurement coverage, 0-5 years",
        Domain::Anaemia => "Anaemia rates of pregnant women, lactating mothers and children",
        Domain::LowBirthWeight => "Low birth weight rate among children 0-6 months",
        Domain::GestationalWeightGain => "ANC completion, optimum weight gain and Hb testing",
        Domain::AdolescentGirls => "Thinness, measurement coverage and anaemia of girls 14-18",
        Domain::MeasuringEfficiency => "Measurement coverage and share of efficient workers",
        Domain::HomeVisit => "Home visit coverage by anganwadi workers",
        Domain::SnpProjections => "SAM/SUW burden and beneficiary mix",
        Domain::AwcSummary => "Centre activity, churn and readiness",
    }
}

/// Get all domain info, in cube join order
pub fn available_domains() -> Vec<DomainInfo> {
    Domain::ALL
        .into_iter()
        .map(|domain| DomainInfo {
            domain,
            category: category_of(domain),
            description: description_of(domain),
            derived_fields: analyzer_for(domain).derived_fields(),
        })
        .collect()
}

/// Get domains by category
pub fn domains_by_category(category: DomainCategory) -> Vec<DomainInfo> {
    available_domains()
        .into_iter()
        .filter(|d| d.category == category)
        .collect()
}

/// Get domain info by key
pub fn get_domain_info(key: &str) -> Option<DomainInfo> {
    let domain = Domain::from_key(key)?;
    available_domains().into_iter().find(|d| d.domain == domain)
}

/// Count domains by category
pub fn count_by_category() -> HashMap<DomainCategory, usize> {
    let mut counts = HashMap::new();
    for info in available_domains() {
        *counts.entry(info.category).or_insert(0) += 1;
    }
    counts
}
