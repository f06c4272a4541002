use std::collections::HashMap;
use std::sync::Arc;

use agent_first_storage::{
    AGENTS_TOPIC_ID, APRENDA_TOPIC_ID, ConversationId, PRECOS_TOPIC_ID, SOBRE_TOPIC_ID,
    TopicCatalog,
};

use super::Responder;
use super::rules::KeywordGenerator;
use super::tables;

pub const KEYWORD_ROUTER_ID: &str = "keyword-router";

/// Classification of a conversation for reply generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route<'a> {
    Topic(&'a str),
    FreeForm,
}

/// Picks the generator for a conversation and produces its reply.
///
/// Classification looks only at the conversation id: an id that names a catalog
/// topic with a registered generator is that topic, everything else is free-form.
pub struct ResponseRouter {
    catalog: Arc<TopicCatalog>,
    generators: HashMap<String, KeywordGenerator>,
    fallback: KeywordGenerator,
}

impl ResponseRouter {
    pub fn new(catalog: Arc<TopicCatalog>, fallback: KeywordGenerator) -> Self {
        Self {
            catalog,
            generators: HashMap::new(),
            fallback,
        }
    }

    /// Router wired with the Sobre/Agents/Aprenda/Preços tables.
    pub fn builtin(catalog: Arc<TopicCatalog>) -> Self {
        Self::new(catalog, tables::GENERIC)
            .with_generator(SOBRE_TOPIC_ID, tables::SOBRE)
            .with_generator(AGENTS_TOPIC_ID, tables::AGENTS)
            .with_generator(APRENDA_TOPIC_ID, tables::APRENDA)
            .with_generator(PRECOS_TOPIC_ID, tables::PRECOS)
    }

    pub fn with_generator(
        mut self,
        topic_id: impl Into<String>,
        generator: KeywordGenerator,
    ) -> Self {
        self.generators.insert(topic_id.into(), generator);
        self
    }

    pub fn catalog(&self) -> &TopicCatalog {
        &self.catalog
    }

    pub fn classify(&self, conversation_id: &ConversationId) -> Route<'_> {
        match self.catalog.get(conversation_id.as_str()) {
            Some(topic) if self.generators.contains_key(&topic.id) => Route::Topic(&topic.id),
            _ => Route::FreeForm,
        }
    }

    pub fn generator_for(&self, route: Route<'_>) -> &KeywordGenerator {
        match route {
            Route::Topic(topic_id) => self.generators.get(topic_id).unwrap_or(&self.fallback),
            Route::FreeForm => &self.fallback,
        }
    }
}

impl Responder for ResponseRouter {
    fn id(&self) -> &str {
        KEYWORD_ROUTER_ID
    }

    fn name(&self) -> &str {
        "Keyword router"
    }

    fn respond(&self, conversation_id: &ConversationId, text: &str) -> String {
        let route = self.classify(conversation_id);
        let generator = self.generator_for(route);

        tracing::debug!(
            conversation_id = %conversation_id,
            route = ?route,
            generator = generator.name(),
            matched_rule = ?generator.matched_rule(text),
            "routing reply"
        );

        generator.generate(text)
    }
}
