//! The bargaining tables the engine runs, in bargaining order.

use crate::event::{Mediation, Settlement};

/// One bargaining table: a set of unions facing one employer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NegotiationPair {
    pub label: &'static str,
    pub union_ids: &'static [&'static str],
    pub employer_id: &'static str,
    /// Phase in which this table negotiates.
    pub phase: u8,
}

impl NegotiationPair {
    fn covers(&self, employer_id: &str, union_ids: &[crate::core::ids::AgentId]) -> bool {
        self.employer_id == employer_id
            && union_ids
                .iter()
                .any(|u| self.union_ids.contains(&u.as_str()))
    }

    /// A settlement closes this table when it names the employer and at
    /// least one of the table's unions.
    pub fn matches(&self, settlement: &Settlement) -> bool {
        self.covers(settlement.employer_id.as_str(), &settlement.union_ids)
    }

    pub fn matches_mediation(&self, mediation: &Mediation) -> bool {
        self.covers(mediation.employer_id.as_str(), &mediation.union_ids)
    }
}

pub const STANDARD_PAIRS: [NegotiationPair; 4] = [
    NegotiationPair {
        label: "Industriavtalet",
        union_ids: &["if_metall", "unionen"],
        employer_id: "teknikforetagen",
        phase: 2,
    },
    NegotiationPair {
        label: "Handels – Svensk Handel",
        union_ids: &["handels"],
        employer_id: "svensk_handel",
        phase: 3,
    },
    NegotiationPair {
        label: "Unionen – Almega",
        union_ids: &["unionen"],
        employer_id: "almega",
        phase: 3,
    },
    NegotiationPair {
        label: "Offentlig sektor",
        union_ids: &["kommunal", "vision", "vardforbundet"],
        employer_id: "skr",
        phase: 4,
    },
];

/// Where one table stands in the current aggregate.
#[derive(Debug, Clone, Copy)]
pub struct PairProgress<'a> {
    pub pair: &'static NegotiationPair,
    pub settlement: Option<&'a Settlement>,
    /// Mediator proposal for this table, if one was made.
    pub mediation: Option<&'a Mediation>,
}

impl PairProgress<'_> {
    pub fn is_settled(&self) -> bool {
        self.settlement.is_some()
    }

    /// Agreed level, falling back to the mediated level.
    pub fn level(&self) -> Option<f64> {
        self.settlement
            .map(|s| s.level)
            .or_else(|| self.mediation.map(|m| m.level))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settlement(unions: &[&str], employer: &str) -> Settlement {
        Settlement {
            union_ids: unions.iter().map(|u| (*u).into()).collect(),
            employer_id: employer.into(),
            level: 2.9,
            round: 7,
        }
    }

    #[test]
    fn test_partial_union_overlap_matches() {
        let public = &STANDARD_PAIRS[3];
        assert!(public.matches(&settlement(&["vision"], "skr")));
        assert!(!public.matches(&settlement(&["vision"], "almega")));
        assert!(!public.matches(&settlement(&["handels"], "skr")));
    }

    #[test]
    fn test_progress_level_falls_back_to_mediation() {
        let mediation = Mediation {
            description: "Medlingsinstitutet brokers a settlement at 3.0%".to_string(),
            union_ids: vec!["handels".into()],
            employer_id: "svensk_handel".into(),
            level: 3.0,
        };
        let progress = PairProgress {
            pair: &STANDARD_PAIRS[1],
            settlement: None,
            mediation: Some(&mediation),
        };
        assert!(!progress.is_settled());
        assert_eq!(progress.level(), Some(3.0));
        assert!(STANDARD_PAIRS[1].matches_mediation(&mediation));
    }
}
