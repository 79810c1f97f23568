//! Severity rule table

use lccqa_core::{ClassRegistry, Error, Result, Severity};

/// One tier of the rule table as configured: full or abbreviated class names.
#[derive(Debug, Clone)]
pub struct SeverityRule {
    pub tier: Severity,
    pub transitions: Vec<(String, String)>,
}

impl SeverityRule {
    pub fn new<I, A, B>(tier: Severity, transitions: I) -> Self
    where
        I: IntoIterator<Item = (A, B)>,
        A: Into<String>,
        B: Into<String>,
    {
        Self {
            tier,
            transitions: transitions
                .into_iter()
                .map(|(a, b)| (a.into(), b.into()))
                .collect(),
        }
    }
}

/// Resolved rule table.
///
/// Class names are stored as the registry's effective names, so the table
/// matches matrices built from the same registry. Tiers are held in priority
/// order, highest severity first.
#[derive(Debug, Clone, Default)]
pub struct RuleTable {
    tiers: Vec<(Severity, Vec<(String, String)>)>,
}

impl RuleTable {
    /// Resolve configured rules against the registry.
    ///
    /// Names are translated once here; the resulting table is reused for
    /// every region. Rules for the same tier are combined. A `Normal` tier or
    /// a class missing from the registry is an error.
    pub fn new<I>(registry: &ClassRegistry, rules: I) -> Result<Self>
    where
        I: IntoIterator<Item = SeverityRule>,
    {
        let mut tiers: Vec<(Severity, Vec<(String, String)>)> = Vec::new();

        for rule in rules {
            if rule.tier == Severity::Normal {
                return Err(Error::InvalidParameter {
                    name: "tier",
                    value: rule.tier.name().to_string(),
                    reason: "rules may only name review or invalid tiers".into(),
                });
            }

            let mut pairs = Vec::with_capacity(rule.transitions.len());
            for (early, late) in &rule.transitions {
                pairs.push((effective(registry, early)?, effective(registry, late)?));
            }

            match tiers.iter_mut().find(|(tier, _)| *tier == rule.tier) {
                Some((_, existing)) => existing.extend(pairs),
                None => tiers.push((rule.tier, pairs)),
            }
        }

        tiers.sort_by(|a, b| b.0.cmp(&a.0));
        Ok(Self { tiers })
    }

    /// Tiers in priority order, highest severity first
    pub fn tiers(&self) -> impl Iterator<Item = (Severity, &[(String, String)])> {
        self.tiers.iter().map(|(tier, pairs)| (*tier, pairs.as_slice()))
    }

    /// Highest tier listing the pair, or `Normal`
    pub fn tier_of(&self, early: &str, late: &str) -> Severity {
        self.tiers
            .iter()
            .find(|(_, pairs)| pairs.iter().any(|(e, l)| e == early && l == late))
            .map(|(tier, _)| *tier)
            .unwrap_or(Severity::Normal)
    }
}

fn effective(registry: &ClassRegistry, name: &str) -> Result<String> {
    let i = registry.resolve(name, "severity rule")?;
    Ok(registry.classes().names()[i].clone())
}
