//! Business naming from a curated list of venture concepts.
//!
//! Names are handed out in list order. When the population outgrows
//! the list, the remainder is named "Business <n>" where n is the
//! business's 1-based position in the population. A synthesized name
//! that would collide with a preferred one is skipped in favour of the
//! next free number, so every name in a population is distinct.

use crate::error::ConfigurationError;
use std::collections::HashSet;

/// Ordered preferred names plus the synthesized-name fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamingPolicy {
    preferred: Vec<String>,
}

impl NamingPolicy {
    /// Build a policy from an ordered list of preferred names.
    ///
    /// Fails on a blank name or on the same name appearing twice.
    pub fn new<S: Into<String>>(
        preferred: impl IntoIterator<Item = S>,
    ) -> Result<Self, ConfigurationError> {
        let preferred: Vec<String> = preferred.into_iter().map(Into::into).collect();
        let mut seen = HashSet::with_capacity(preferred.len());
        for (position, name) in preferred.iter().enumerate() {
            if name.trim().is_empty() {
                return Err(ConfigurationError::BlankName { position });
            }
            if !seen.insert(name.as_str()) {
                return Err(ConfigurationError::DuplicateName { name: name.clone() });
            }
        }
        Ok(Self { preferred })
    }

    /// Synthesized names only.
    pub fn synthesized_only() -> Self {
        Self { preferred: Vec::new() }
    }

    pub fn preferred(&self) -> &[String] {
        &self.preferred
    }

    /// Names for a population of `count` businesses, in population order.
    pub fn names(&self, count: usize) -> Vec<String> {
        let mut names: Vec<String> = self.preferred.iter().take(count).cloned().collect();
        if count <= names.len() {
            return names;
        }

        let taken: HashSet<&str> = self.preferred.iter().map(String::as_str).collect();
        let mut n = names.len() + 1;
        while names.len() < count {
            let candidate = synthesized_name(n);
            if !taken.contains(candidate.as_str()) {
                names.push(candidate);
            }
            n += 1;
        }
        names
    }
}

impl Default for NamingPolicy {
    fn default() -> Self {
        Self {
            preferred: default_business_names().iter().map(|s| s.to_string()).collect(),
        }
    }
}

pub fn synthesized_name(n: usize) -> String {
    format!("Business {n}")
}

/// Curated list of 20 venture concepts.
pub fn default_business_names() -> &'static [&'static str] {
    &[
        "Automated Construction Robots",
        "AI for Simulating Autonomous Vehicle Scenarios",
        "Cybersecurity Defense Solutions",
        "Smart Factory Optimization",
        "AI-based Satellite Image Analysis",
        "Renewable Energy Yield Optimization",
        "AI-Enhanced Open Source Cybersecurity Tools",
        "Spatial Data Analytics for Retail",
        "AI for Real-time Supply Chain Adaptation",
        "AI Code Reviewer",
        "XAI for Healthcare Decision Support",
        "Supply Chain Optimization",
        "AI-Driven Code Generation for Custom Software",
        "Stablecoin-Backed Lending Platforms",
        "AI-Driven Early Detection Systems",
        "AI for Personalized Genomic Medicine",
        "Remote Patient Monitoring Platform",
        "Direct Pharmaceutical Access",
        "Automated Integration Platforms",
        "Efficient Retail Inventory Management",
    ]
}
