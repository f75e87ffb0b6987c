//! Built-in sustainability knowledge base
//!
//! A small, read-only table of guidance entries tagged by category. Entries
//! are selected by rebound level and behavior score; there is no text search.

use crate::models::ReboundLevel;

/// Maximum number of entries returned by [`relevant_entries`]
pub const MAX_RELEVANT: usize = 5;

/// Behavior scores below this pull in behavior-improvement guidance
pub const BEHAVIOR_GUIDANCE_THRESHOLD: f64 = 70.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    ReboundEffect,
    Prevention,
    Indicators,
    BestPractices,
    CarbonOffset,
    MediumRebound,
    LowRebound,
    PeakOptimization,
    BehaviorImprovement,
    CriticalResponse,
}

impl Category {
    /// Categories consulted for a rebound level, in priority order
    pub fn for_level(level: ReboundLevel) -> &'static [Category] {
        match level {
            ReboundLevel::High => &[
                Category::ReboundEffect,
                Category::Prevention,
                Category::CriticalResponse,
                Category::Indicators,
            ],
            ReboundLevel::Medium => &[
                Category::MediumRebound,
                Category::Prevention,
                Category::PeakOptimization,
            ],
            ReboundLevel::Low => &[
                Category::LowRebound,
                Category::BestPractices,
                Category::CarbonOffset,
            ],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnowledgeEntry {
    pub id: u32,
    pub category: Category,
    pub content: &'static str,
}

impl KnowledgeEntry {
    /// First actionable sentence after the entry's lead-in colon, if the
    /// entry has one that is long enough to stand alone
    pub fn action(&self) -> Option<String> {
        let (_, rest) = self.content.split_once(':')?;
        let rest = rest.trim();
        if rest.len() <= 30 {
            return None;
        }
        let sentence = rest.split('.').next().unwrap_or(rest);
        Some(format!("{}.", sentence))
    }
}

pub static KNOWLEDGE_BASE: [KnowledgeEntry; 10] = [
    KnowledgeEntry {
        id: 1,
        category: Category::ReboundEffect,
        content: "The rebound effect occurs when energy efficiency improvements lead to increased usage, offsetting 30-80% of expected savings. Most common in LED lighting, HVAC systems, and fuel-efficient vehicles.",
    },
    KnowledgeEntry {
        id: 2,
        category: Category::Prevention,
        content: "To prevent rebound effects: Implement automated usage schedules, monitor consumption patterns weekly, set usage caps on efficient devices, use smart timers during peak hours, and educate users about behavioral impacts.",
    },
    KnowledgeEntry {
        id: 3,
        category: Category::Indicators,
        content: "High rebound indicators include: Efficiency score below 50%, increasing usage duration post-upgrade, peak-hour consumption spikes above 30%, weekend usage 20% above baseline, and declining behavior scores.",
    },
    KnowledgeEntry {
        id: 4,
        category: Category::BestPractices,
        content: "Energy efficiency best practices: Schedule HVAC during off-peak hours, maximize natural lighting, enable power-saving modes on all devices, track standby power consumption, and use occupancy sensors.",
    },
    KnowledgeEntry {
        id: 5,
        category: Category::CarbonOffset,
        content: "Carbon offset strategies: Switch to 100% renewable energy providers, invest in rooftop solar panels, participate in verified carbon credit programs, reduce business travel emissions, and support reforestation projects.",
    },
    KnowledgeEntry {
        id: 6,
        category: Category::MediumRebound,
        content: "Medium rebound level indicates 40-70% efficiency offset. Recommended actions: Review usage schedules, implement gradual restrictions, increase monitoring frequency, and provide user education on sustainable practices.",
    },
    KnowledgeEntry {
        id: 7,
        category: Category::LowRebound,
        content: "Low rebound level (under 30%) shows effective sustainability. Maintain practices: Continue current automation, share best practices with team, explore advanced efficiency technologies, and set ambitious new targets.",
    },
    KnowledgeEntry {
        id: 8,
        category: Category::PeakOptimization,
        content: "Peak hour optimization: Shift high-consumption activities to off-peak times (9 PM - 6 AM), use battery storage during peak hours, enable load balancing systems, and implement demand response programs.",
    },
    KnowledgeEntry {
        id: 9,
        category: Category::BehaviorImprovement,
        content: "Behavior improvement strategies: Gamify energy savings with leaderboards, provide real-time consumption feedback, offer incentives for efficiency goals, and create sustainability challenges for teams.",
    },
    KnowledgeEntry {
        id: 10,
        category: Category::CriticalResponse,
        content: "Critical rebound response: Immediately implement usage caps, send automated alerts for excessive consumption, enable forced power-down during specific hours, and conduct emergency user training sessions.",
    },
];

/// Entries relevant to a rebound level and behavior score, deduplicated by
/// id, in table order within each category group, at most [`MAX_RELEVANT`]
pub fn relevant_entries(level: ReboundLevel, behavior_score: f64) -> Vec<&'static KnowledgeEntry> {
    let categories = Category::for_level(level);
    let mut entries: Vec<&'static KnowledgeEntry> = KNOWLEDGE_BASE
        .iter()
        .filter(|e| categories.contains(&e.category))
        .collect();

    if behavior_score < BEHAVIOR_GUIDANCE_THRESHOLD {
        entries.extend(
            KNOWLEDGE_BASE
                .iter()
                .filter(|e| e.category == Category::BehaviorImprovement),
        );
    }

    let mut seen = std::collections::HashSet::new();
    entries.retain(|e| seen.insert(e.id));
    entries.truncate(MAX_RELEVANT);
    entries
}
