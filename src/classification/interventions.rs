//! Green intervention suggestions.
//!
//! Each exposure type has a pool of candidate interventions per severity
//! tier. A corridor gets two picks from its primary pool, one from its
//! secondary pool, and one from the contextual add-ons its metrics qualify
//! for. All picks are seeded from the metric values.

use super::exposure_type::ExposureType;
use super::selector::{metrics_seed, DeterministicSelector};
use super::severity::SeverityTier;
use serde::{Deserialize, Serialize};

const PRIMARY_PICKS: usize = 2;
const SECONDARY_PICKS: usize = 1;
const CONTEXTUAL_PICKS: usize = 1;

const SECONDARY_SEED_OFFSET: u64 = 999;
const CONTEXTUAL_SEED_OFFSET: u64 = 777;

type Pool = [&'static str; 4];

const HEAT_POOLS: [Pool; 3] = [
    [
        "Dense shade tree canopy (Neem / Peepal / Banyan)",
        "Cool pavement coating with high solar reflectance",
        "Mist-cooling stations at pedestrian nodes",
        "Shaded bus-stop green shelters",
    ],
    [
        "Linear street tree planting (min 8 m canopy spread)",
        "Reflective roofing incentives for adjacent buildings",
        "Pergola-covered walkways with climbing vines",
        "Roadside bioswales with evaporative cooling effect",
    ],
    [
        "Median strip tree planting",
        "Green awnings on south-facing facades",
        "Light-colored permeable paving",
        "Community shade garden along setback areas",
    ],
];

const POLLUTION_POOLS: [Pool; 3] = [
    [
        "Multi-row dense vegetation buffer (3–5 m depth)",
        "Vertical green walls on boundary walls",
        "PM-trapping hedge rows (Thevetia / Ficus)",
        "Anti-dust green mesh barriers during construction",
    ],
    [
        "Roadside dense shrub planting for particulate capture",
        "Green screens on pedestrian-side railings",
        "Staggered tree + shrub layering for max filtration",
        "Dust-suppressing ground-cover planting on verges",
    ],
    [
        "Single-row pollution-tolerant tree planting",
        "Green noise + dust barrier along flyover edges",
        "Creeper-covered chain-link fencing",
        "Raised planter beds with air-purifying species",
    ],
];

const GREEN_DEFICIT_POOLS: [Pool; 3] = [
    [
        "Pocket park network (every 300 m along corridor)",
        "Continuous green cycle lane with native planting",
        "Reclaim unused road margin for micro-forests (Miyawaki)",
        "Pedestrian-priority green boulevard redesign",
    ],
    [
        "Median green strip with flowering native species",
        "Tree-lined footpath connecting existing parks",
        "Corner-plot pocket gardens at intersections",
        "Rain garden chain along roadside drains",
    ],
    [
        "Container-based mobile greenery at key junctions",
        "Climbing-plant trellises on dividers and walls",
        "Community-adopted verge planting program",
        "Weekend pop-up green market zones",
    ],
];

const MIXED_POOLS: [Pool; 3] = [
    [
        "Multi-functional green corridor: shade + filtration + habitat",
        "Integrated stormwater bio-retention with canopy trees",
        "Complete street redesign: reduce lanes, add green median + buffers",
        "Urban food forest pilot with canopy, shrub, and ground layers",
    ],
    [
        "Combined tree + shrub planting for cooling and dust capture",
        "Green transit corridor: shaded BRT lane with vegetation buffer",
        "Swale-and-shade parkway along arterial service road",
        "Pollinator pathway with native wildflowers and shade trees",
    ],
    [
        "Tactical urbanism: painted + potted greenery pilot",
        "Layered planting: ground cover + shrub + small tree",
        "Neighbourhood green link connecting two open spaces",
        "Green signage corridor: information boards + planting",
    ],
];

/// Candidate interventions for a type at a severity tier.
pub fn candidate_pool(exposure: ExposureType, tier: SeverityTier) -> &'static [&'static str] {
    let pools = match exposure {
        ExposureType::HeatDominated => &HEAT_POOLS,
        ExposureType::PollutionDominated => &POLLUTION_POOLS,
        ExposureType::GreenDeficit => &GREEN_DEFICIT_POOLS,
        ExposureType::Mixed => &MIXED_POOLS,
    };
    let tier_index = match tier {
        SeverityTier::Critical => 0,
        SeverityTier::High => 1,
        SeverityTier::Moderate => 2,
    };
    &pools[tier_index]
}

/// Metric values that drive selection.
///
/// `green_deficit` is already resolved to a value; the others stay optional
/// so an absent reading never triggers a threshold add-on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionMetrics {
    pub heat: Option<f64>,
    pub aqi: Option<f64>,
    pub green_deficit: f64,
    pub priority: Option<f64>,
}

impl SelectionMetrics {
    pub fn seed(&self) -> u64 {
        metrics_seed(&[self.heat, self.aqi, Some(self.green_deficit), self.priority])
    }
}

/// Suggestions unlocked by a specific metric condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextualAddon {
    AirQualityDisplays,
    FastGrowingShade,
    TreeAdoption,
    FastTrackContainers,
    SmogEatingFacades,
    ProtectExistingVegetation,
    OrnamentalAvenues,
    LowCostBeautification,
}

impl ContextualAddon {
    pub const ALL: [ContextualAddon; 8] = [
        ContextualAddon::AirQualityDisplays,
        ContextualAddon::FastGrowingShade,
        ContextualAddon::TreeAdoption,
        ContextualAddon::FastTrackContainers,
        ContextualAddon::SmogEatingFacades,
        ContextualAddon::ProtectExistingVegetation,
        ContextualAddon::OrnamentalAvenues,
        ContextualAddon::LowCostBeautification,
    ];

    pub fn applies(&self, m: &SelectionMetrics) -> bool {
        let above = |value: Option<f64>, limit: f64| value.is_some_and(|v| v > limit);
        let below = |value: Option<f64>, limit: f64| value.is_some_and(|v| v < limit);
        match self {
            ContextualAddon::AirQualityDisplays => above(m.aqi, 0.7),
            ContextualAddon::FastGrowingShade => above(m.heat, 0.8),
            ContextualAddon::TreeAdoption => m.green_deficit > 0.8,
            ContextualAddon::FastTrackContainers => above(m.priority, 0.75),
            ContextualAddon::SmogEatingFacades => above(m.heat, 0.5) && above(m.aqi, 0.5),
            ContextualAddon::ProtectExistingVegetation => m.green_deficit < 0.3,
            ContextualAddon::OrnamentalAvenues => below(m.aqi, 0.2),
            ContextualAddon::LowCostBeautification => below(m.priority, 0.35),
        }
    }

    pub fn suggestion(&self) -> &'static str {
        match self {
            ContextualAddon::AirQualityDisplays => {
                "Install real-time AQI display boards to raise community awareness"
            }
            ContextualAddon::FastGrowingShade => {
                "Prioritize fast-growing shade species (e.g., Albizia, Cassia) for rapid canopy"
            }
            ContextualAddon::TreeAdoption => {
                "Establish tree-adoption program with local residents and schools"
            }
            ContextualAddon::FastTrackContainers => {
                "Fast-track implementation: deploy pre-grown container trees for immediate impact"
            }
            ContextualAddon::SmogEatingFacades => {
                "Deploy smog-eating vertical gardens on adjacent building façades"
            }
            ContextualAddon::ProtectExistingVegetation => {
                "Maintain and protect existing vegetation — add tree guards and no-parking zones"
            }
            ContextualAddon::OrnamentalAvenues => {
                "Focus on shade and aesthetics — install ornamental flowering tree avenues"
            }
            ContextualAddon::LowCostBeautification => {
                "Low-cost beautification: painted kerbs, potted plants, and community murals"
            }
        }
    }

    /// Add-ons whose condition holds, in declaration order.
    pub fn qualifying(metrics: &SelectionMetrics) -> Vec<&'static str> {
        Self::ALL
            .iter()
            .filter(|addon| addon.applies(metrics))
            .map(ContextualAddon::suggestion)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterventionPlan {
    pub interventions: Vec<String>,
    pub rationale: String,
}

pub fn select_interventions(
    primary: ExposureType,
    secondary: ExposureType,
    tier: SeverityTier,
    metrics: &SelectionMetrics,
) -> InterventionPlan {
    let selector = DeterministicSelector::new(metrics.seed());
    let contextual = ContextualAddon::qualifying(metrics);

    let picks = selector
        .pick(candidate_pool(primary, tier), PRIMARY_PICKS)
        .into_iter()
        .chain(
            selector
                .offset(SECONDARY_SEED_OFFSET)
                .pick(candidate_pool(secondary, tier), SECONDARY_PICKS),
        )
        .chain(
            selector
                .offset(CONTEXTUAL_SEED_OFFSET)
                .pick(&contextual, CONTEXTUAL_PICKS),
        );

    let mut interventions: Vec<String> = Vec::new();
    for pick in picks {
        if !interventions.iter().any(|existing| existing == pick) {
            interventions.push(pick.to_string());
        }
    }

    InterventionPlan {
        interventions,
        rationale: rationale(primary, secondary, tier),
    }
}

pub fn rationale(primary: ExposureType, secondary: ExposureType, tier: SeverityTier) -> String {
    format!(
        "{}-severity corridor primarily affected by {}, with secondary {}. \
         Interventions target the dominant exposure while addressing co-benefits.",
        tier.label(),
        primary.label(),
        secondary.label()
    )
}
