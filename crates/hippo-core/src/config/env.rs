use super::{Config, ProviderKind};

fn parse_kind(var: &str, value: &str) -> Option<ProviderKind> {
    if let Ok(kind) = serde_json::from_value(serde_json::Value::String(value.to_owned())) {
        Some(kind)
    } else {
        tracing::warn!("ignoring invalid {var} value: {value}");
        None
    }
}

impl Config {
    pub(crate) fn apply_env_overrides(&mut self) {
        self.apply_env_overrides_llm();
        self.apply_env_overrides_pipeline();
    }

    fn apply_env_overrides_llm(&mut self) {
        if let Ok(v) = std::env::var("HIPPO_LLM_PROVIDER")
            && let Some(kind) = parse_kind("HIPPO_LLM_PROVIDER", &v)
        {
            self.llm.provider = kind;
        }
        if let Ok(v) = std::env::var("HIPPO_OPENAI_BASE_URL") {
            self.llm.openai.base_url = v;
        }
        if let Ok(v) = std::env::var("HIPPO_OPENAI_MODEL") {
            self.llm.openai.model = v;
        }
        if let Ok(v) = std::env::var("HIPPO_OPENAI_EMBEDDING_MODEL") {
            self.llm.openai.embedding_model = Some(v).filter(|m| !m.is_empty());
        }
        if let Ok(v) = std::env::var("HIPPO_GROQ_BASE_URL") {
            self.llm.groq.base_url = v;
        }
        if let Ok(v) = std::env::var("HIPPO_GROQ_MODEL") {
            self.llm.groq.model = v;
        }
        if let Ok(v) = std::env::var("HIPPO_TIMEOUT_LLM") {
            match v.parse::<u64>() {
                Ok(secs) => self.timeouts.llm_seconds = secs,
                Err(_) => tracing::warn!("ignoring invalid HIPPO_TIMEOUT_LLM value: {v}"),
            }
        }
    }

    fn apply_env_overrides_pipeline(&mut self) {
        if let Ok(v) = std::env::var("HIPPO_EMBEDDING_PROVIDER")
            && let Some(kind) = parse_kind("HIPPO_EMBEDDING_PROVIDER", &v)
        {
            self.embedding.provider = kind;
        }
        if let Ok(v) = std::env::var("HIPPO_CHUNK_SIZE") {
            match v.parse::<usize>() {
                Ok(n) => self.chunking.chunk_size = n,
                Err(_) => tracing::warn!("ignoring invalid HIPPO_CHUNK_SIZE value: {v}"),
            }
        }
        if let Ok(v) = std::env::var("HIPPO_CHUNK_OVERLAP") {
            match v.parse::<usize>() {
                Ok(n) => self.chunking.chunk_overlap = n,
                Err(_) => tracing::warn!("ignoring invalid HIPPO_CHUNK_OVERLAP value: {v}"),
            }
        }
        if let Ok(v) = std::env::var("HIPPO_CHUNK_UNIT") {
            match serde_json::from_value(serde_json::Value::String(v.clone())) {
                Ok(unit) => self.chunking.unit = unit,
                Err(_) => tracing::warn!("ignoring invalid HIPPO_CHUNK_UNIT value: {v}"),
            }
        }
        if let Ok(v) = std::env::var("HIPPO_EMBED_CONCURRENCY") {
            match v.parse::<usize>() {
                Ok(n) => self.embedding.concurrency = n,
                Err(_) => tracing::warn!("ignoring invalid HIPPO_EMBED_CONCURRENCY value: {v}"),
            }
        }
        if let Ok(v) = std::env::var("HIPPO_TIMEOUT_EMBEDDING") {
            match v.parse::<u64>() {
                Ok(secs) => self.timeouts.embedding_seconds = secs,
                Err(_) => tracing::warn!("ignoring invalid HIPPO_TIMEOUT_EMBEDDING value: {v}"),
            }
        }
    }
}
