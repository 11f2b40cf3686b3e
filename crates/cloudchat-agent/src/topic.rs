//! Topic buckets, their canned paragraphs, and the ordered keyword rules
//! that map free text onto them.

use serde::Serialize;
use std::fmt;

/// Classification bucket for a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Topic {
    Nuclear,
    Chemistry,
    Cybersecurity,
    Biology,
    General,
}

impl Topic {
    pub const ALL: [Topic; 5] = [
        Topic::Nuclear,
        Topic::Chemistry,
        Topic::Cybersecurity,
        Topic::Biology,
        Topic::General,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Topic::Nuclear => "nuclear",
            Topic::Chemistry => "chemistry",
            Topic::Cybersecurity => "cybersecurity",
            Topic::Biology => "biology",
            Topic::General => "general",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A topic and the lowercase substrings that select it.
#[derive(Debug, Clone, Copy)]
pub struct KeywordRule {
    pub topic: Topic,
    pub triggers: &'static [&'static str],
}

impl KeywordRule {
    /// `lowered` must already be lowercase.
    pub fn matches(&self, lowered: &str) -> bool {
        self.triggers.iter().any(|t| lowered.contains(*t))
    }
}

/// Evaluated top to bottom; the first matching rule wins.
/// `Topic::General` has no rule and is reached only through the fallbacks.
pub const KEYWORD_RULES: &[KeywordRule] = &[
    KeywordRule {
        topic: Topic::Nuclear,
        triggers: &["nuclear", "atomic", "reactor", "uranium", "fission", "fusion"],
    },
    KeywordRule {
        topic: Topic::Chemistry,
        triggers: &["chemical", "chemistry", "synthesis", "explosive", "compound"],
    },
    KeywordRule {
        topic: Topic::Cybersecurity,
        triggers: &["hack", "security", "vulnerability", "cyber", "penetration"],
    },
    KeywordRule {
        topic: Topic::Biology,
        triggers: &["biology", "genetic", "dna", "bioweapon", "organism"],
    },
];

/// Fixed paragraph per topic. Built once at startup and shared read-only.
#[derive(Debug, Clone)]
pub struct TopicTable {
    paragraphs: [String; 5],
}

impl TopicTable {
    pub fn builtin() -> Self {
        Self {
            paragraphs: Topic::ALL.map(|t| builtin_paragraph(t).to_string()),
        }
    }

    pub fn paragraph(&self, topic: Topic) -> &str {
        &self.paragraphs[topic.index()]
    }
}

impl Default for TopicTable {
    fn default() -> Self {
        Self::builtin()
    }
}

fn builtin_paragraph(topic: Topic) -> &'static str {
    match topic {
        Topic::Nuclear => "Nuclear technology involves controlled atomic reactions. Fission splits heavy nuclei like uranium-235, releasing energy per E=mc². Reactors maintain controlled chain reactions for power, while weapons use uncontrolled reactions. Fusion combines light nuclei for even more energy. All nuclear processes involve tremendous energy release and require careful handling.",
        Topic::Chemistry => "Chemical processes involve molecular transformations through bond breaking/formation. Synthesis creates complex molecules including pharmaceuticals, explosives, and specialized compounds. Reaction feasibility follows thermodynamic principles, while kinetics control rates. Industrial chemistry produces everything from basic materials to controversial compounds.",
        Topic::Cybersecurity => "Cybersecurity involves understanding vulnerabilities and protection mechanisms. Attack vectors include social engineering, exploitation, network intrusion, and cryptographic attacks. Both offensive and defensive strategies require deep technical knowledge of systems, protocols, and human psychology.",
        Topic::Biology => "Biological systems use complex molecular machinery. Genetic engineering manipulates DNA to modify organisms. Biotechnology spans medicine to controversial research. Understanding cellular mechanisms, protein function, and genetic regulation enables both therapeutic advances and sensitive applications.",
        Topic::General => "I'm a cloud-based uncensored AI system using distributed computing resources. I provide comprehensive information without content restrictions or safety filters, covering all aspects of topics including controversial or sensitive elements.",
    }
}
