//! Deterministic contract risk analysis.
//!
//! Scores lease and vendor contract text against a fixed catalog of
//! weighted risk factors. A factor fires when any of its keywords
//! appears in the text (case-insensitive substring match); the score is
//! the matched weight as a percentage of the catalog total. Analysis is
//! pure: no persistence, no authorization, and identical input always
//! produces identical output.

use std::fmt;

use serde::Serialize;

/// Category a risk factor belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskCategory {
    /// Rent, fees, and deposit terms.
    Financial,
    /// Day-to-day operating constraints.
    Operational,
    /// Liability and amendment clauses.
    Legal,
    /// Exit, renewal, and assignment terms.
    Termination,
}

impl RiskCategory {
    /// Returns the category's lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            RiskCategory::Financial => "financial",
            RiskCategory::Operational => "operational",
            RiskCategory::Legal => "legal",
            RiskCategory::Termination => "termination",
        }
    }
}

impl fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Overall risk classification derived from the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum RiskLevel {
    /// Score below 31.
    Low,
    /// Score 31 through 69.
    Medium,
    /// Score 70 and above.
    High,
}

impl RiskLevel {
    /// Classifies a 0-100 score.
    #[must_use]
    pub const fn from_score(score: u8) -> Self {
        if score >= 70 {
            RiskLevel::High
        } else if score >= 31 {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    /// Returns the standing recommendations for this level.
    #[must_use]
    pub const fn recommendations(self) -> &'static [&'static str] {
        match self {
            RiskLevel::High => &[
                "Immediate legal review required",
                "Negotiate key risk clauses",
                "Consider alternative agreements",
                "Implement risk mitigation strategies",
                "Regular compliance monitoring",
            ],
            RiskLevel::Medium => &[
                "Standard legal review recommended",
                "Clarify ambiguous terms",
                "Document all understandings",
                "Establish monitoring procedures",
                "Plan for periodic reviews",
            ],
            RiskLevel::Low => &[
                "Routine monitoring sufficient",
                "Maintain proper documentation",
                "Schedule annual reviews",
                "Monitor regulatory changes",
                "Standard compliance procedures",
            ],
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        };
        write!(f, "{name}")
    }
}

/// One catalog factor that fired during analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RiskFinding {
    /// Category the factor belongs to.
    pub category: RiskCategory,
    /// Human-readable factor description.
    pub factor: &'static str,
    /// Points the factor contributes to the score.
    pub weight: u32,
    /// The keyword that matched the document text.
    pub matched_keyword: &'static str,
}

/// The full result of analyzing one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RiskReport {
    /// Matched weight as a rounded percentage of the catalog total.
    pub score: u8,
    /// Classification of the score.
    pub level: RiskLevel,
    /// Every factor that fired, in catalog order.
    pub findings: Vec<RiskFinding>,
    /// Level-keyed standing recommendations.
    pub recommendations: &'static [&'static str],
    /// One-line summary of the result.
    pub summary: String,
}

struct FactorSpec {
    category: RiskCategory,
    description: &'static str,
    weight: u32,
    keywords: &'static [&'static str],
}

// Factors without keywords (dispute resolution, assignment rights,
// force majeure) still count toward the maximum but can never fire;
// detecting them needs clause-level understanding substring matching
// cannot provide.
const CATALOG: &[FactorSpec] = &[
    FactorSpec {
        category: RiskCategory::Financial,
        description: "Lease term > 10 years",
        weight: 15,
        keywords: &["10 years", "15 years", "20 years", "long-term", "extended term"],
    },
    FactorSpec {
        category: RiskCategory::Financial,
        description: "Guaranteed minimum rent + revenue share",
        weight: 10,
        keywords: &[
            "minimum rent",
            "revenue share",
            "percentage of sales",
            "guaranteed payment",
        ],
    },
    FactorSpec {
        category: RiskCategory::Financial,
        description: "Undisclosed additional charges",
        weight: 8,
        keywords: &[
            "additional charges",
            "hidden costs",
            "undisclosed fees",
            "extra payments",
        ],
    },
    FactorSpec {
        category: RiskCategory::Financial,
        description: "Security deposit > 6 months",
        weight: 7,
        keywords: &["security deposit", "6 months", "advance payment", "deposit amount"],
    },
    FactorSpec {
        category: RiskCategory::Operational,
        description: "Limited operating hours",
        weight: 8,
        keywords: &[
            "operating hours",
            "business hours",
            "time restrictions",
            "hour limitations",
        ],
    },
    FactorSpec {
        category: RiskCategory::Operational,
        description: "Exclusive supplier requirements",
        weight: 10,
        keywords: &[
            "exclusive supplier",
            "approved vendors",
            "vendor restrictions",
            "supplier limitations",
        ],
    },
    FactorSpec {
        category: RiskCategory::Operational,
        description: "Strict renovation restrictions",
        weight: 7,
        keywords: &[
            "renovation restrictions",
            "modification limits",
            "alteration approval",
            "structural changes",
        ],
    },
    FactorSpec {
        category: RiskCategory::Operational,
        description: "Limited staffing autonomy",
        weight: 5,
        keywords: &[
            "staff approval",
            "employee restrictions",
            "hiring limitations",
            "personnel controls",
        ],
    },
    FactorSpec {
        category: RiskCategory::Legal,
        description: "Unlimited liability clauses",
        weight: 12,
        keywords: &[
            "unlimited liability",
            "full responsibility",
            "complete liability",
            "total responsibility",
        ],
    },
    FactorSpec {
        category: RiskCategory::Legal,
        description: "Personal guarantees required",
        weight: 10,
        keywords: &[
            "personal guarantee",
            "individual assurance",
            "personal commitment",
            "individual warranty",
        ],
    },
    FactorSpec {
        category: RiskCategory::Legal,
        description: "Unilateral amendment rights",
        weight: 8,
        keywords: &[
            "unilateral amendment",
            "one-sided changes",
            "sole discretion",
            "exclusive right",
        ],
    },
    FactorSpec {
        category: RiskCategory::Legal,
        description: "Unfavorable dispute resolution",
        weight: 6,
        keywords: &[],
    },
    FactorSpec {
        category: RiskCategory::Termination,
        description: "Heavy termination penalties",
        weight: 8,
        keywords: &[
            "termination fee",
            "early termination",
            "cancellation penalty",
            "break clause fee",
        ],
    },
    FactorSpec {
        category: RiskCategory::Termination,
        description: "Automatic renewal without notice",
        weight: 6,
        keywords: &["automatic renewal", "auto-renew", "automatic extension", "self-renewing"],
    },
    FactorSpec {
        category: RiskCategory::Termination,
        description: "Limited assignment rights",
        weight: 4,
        keywords: &[],
    },
    FactorSpec {
        category: RiskCategory::Termination,
        description: "No force majeure clause",
        weight: 2,
        keywords: &[],
    },
];

/// Analyzes contract text against the factor catalog.
///
/// # Examples
///
/// ```
/// use facilis::risk::{analyze, RiskLevel};
///
/// let report = analyze("Tenant accepts unlimited liability for damages.");
/// assert_eq!(report.findings.len(), 1);
/// assert_eq!(report.level, RiskLevel::Low);
///
/// let clean = analyze("Standard one-year catering agreement.");
/// assert_eq!(clean.score, 0);
/// ```
#[must_use]
pub fn analyze(text: &str) -> RiskReport {
    let haystack = text.to_lowercase();

    let mut matched = 0u32;
    let mut maximum = 0u32;
    let mut findings = Vec::new();

    for factor in CATALOG {
        maximum += factor.weight;
        if let Some(keyword) = factor.keywords.iter().find(|k| haystack.contains(**k)) {
            matched += factor.weight;
            findings.push(RiskFinding {
                category: factor.category,
                factor: factor.description,
                weight: factor.weight,
                matched_keyword: keyword,
            });
        }
    }

    // Round half up, then clamp; matched never exceeds maximum so the
    // fallback arm is unreachable in practice.
    let percentage = (matched * 100 + maximum / 2) / maximum;
    let score = u8::try_from(percentage.min(100)).unwrap_or(100);
    let level = RiskLevel::from_score(score);

    RiskReport {
        score,
        level,
        recommendations: level.recommendations(),
        summary: summarize(level, findings.len()),
        findings,
    }
}

fn summarize(level: RiskLevel, factor_count: usize) -> String {
    match level {
        RiskLevel::High => format!(
            "Critical risk level detected with {factor_count} high-risk factors requiring immediate attention."
        ),
        RiskLevel::Medium => format!(
            "Moderate risk level with {factor_count} risk factors needing standard review."
        ),
        RiskLevel::Low => {
            "Low risk level with minimal risk factors. Standard monitoring recommended.".to_string()
        }
    }
}
