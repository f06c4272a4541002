use std::collections::HashSet;

use snafu::ensure;

use super::error::{ConflictSnafu, StoreResult};

pub const SOBRE_TOPIC_ID: &str = "sobre";
pub const AGENTS_TOPIC_ID: &str = "agents";
pub const APRENDA_TOPIC_ID: &str = "aprenda";
pub const PRECOS_TOPIC_ID: &str = "precos";

/// One entry of the predefined topic catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicRecord {
    pub id: String,
    pub title: String,
    pub initial_message: String,
}

impl TopicRecord {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        initial_message: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            initial_message: initial_message.into(),
        }
    }
}

/// Ordered, read-only list of topics. The core looks topics up by id and never
/// mutates the catalog after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicCatalog {
    topics: Vec<TopicRecord>,
}

impl TopicCatalog {
    pub fn new(topics: Vec<TopicRecord>) -> StoreResult<Self> {
        let mut seen = HashSet::new();
        for topic in &topics {
            ensure!(
                seen.insert(topic.id.as_str()),
                ConflictSnafu {
                    stage: "catalog-new",
                    entity: "topic",
                    details: format!("duplicate topic id '{}'", topic.id),
                }
            );
        }

        Ok(Self { topics })
    }

    /// The Agent First menu: Sobre, Agents, Aprenda, Preços.
    pub fn builtin() -> Self {
        Self {
            topics: vec![
                TopicRecord::new(
                    SOBRE_TOPIC_ID,
                    "Sobre",
                    include_str!("../topics/sobre.md").trim_end(),
                ),
                TopicRecord::new(
                    AGENTS_TOPIC_ID,
                    "Agents",
                    include_str!("../topics/agents.md").trim_end(),
                ),
                TopicRecord::new(
                    APRENDA_TOPIC_ID,
                    "Aprenda",
                    include_str!("../topics/aprenda.md").trim_end(),
                ),
                TopicRecord::new(
                    PRECOS_TOPIC_ID,
                    "Preços",
                    include_str!("../topics/precos.md").trim_end(),
                ),
            ],
        }
    }

    pub fn get(&self, topic_id: &str) -> Option<&TopicRecord> {
        self.topics.iter().find(|topic| topic.id == topic_id)
    }

    pub fn contains(&self, topic_id: &str) -> bool {
        self.get(topic_id).is_some()
    }

    pub fn topics(&self) -> &[TopicRecord] {
        &self.topics
    }

    pub fn len(&self) -> usize {
        self.topics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }
}
