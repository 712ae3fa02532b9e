use thiserror::Error;

/// Alias for `Result<T, LoadError>`.
pub type LoadResult<T> = Result<T, LoadError>;

/// Structural problems with a world document. Any of these rejects the whole document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// The document is not valid JSON or a field has the wrong shape.
    #[error("malformed document: {0}")]
    Malformed(String),

    /// A required top-level section is absent.
    #[error("missing required section `{0}`")]
    MissingSection(&'static str),

    /// A key does not follow the `[a-z0-9_]+` syntax.
    #[error("invalid key \"{key}\" in {collection}")]
    InvalidKey {
        /// The collection holding the key.
        collection: &'static str,
        /// The offending key.
        key: String,
    },

    /// The same key appears twice within one collection.
    #[error("duplicate key \"{key}\" in {collection}")]
    DuplicateKey {
        /// The collection holding the key.
        collection: &'static str,
        /// The repeated key.
        key: String,
    },

    /// An entity's inner `id` field disagrees with the key it is stored under.
    #[error("{collection} \"{key}\" declares mismatching id \"{id}\"")]
    IdMismatch {
        /// The collection holding the entity.
        collection: &'static str,
        /// The map key.
        key: String,
        /// The declared id.
        id: String,
    },

    /// An exit uses a direction the compass table does not know.
    #[error("room \"{room}\" has exit in unknown direction \"{direction}\"")]
    UnknownDirection {
        /// The room owning the exit.
        room: String,
        /// The unrecognized direction.
        direction: String,
    },

    /// An alias key or target is empty after normalization.
    #[error("malformed alias \"{0}\"")]
    MalformedAlias(String),

    /// A verb name is empty or contains whitespace.
    #[error("malformed verb \"{0}\"")]
    MalformedVerb(String),

    /// A reference does not resolve to an existing key.
    #[error("{owner}: {field} refers to unknown \"{target}\"")]
    DanglingReference {
        /// Human-readable description of the referencing entity.
        owner: String,
        /// The field holding the reference.
        field: &'static str,
        /// The unresolved key.
        target: String,
    },

    /// A lock/unlock target is neither `room` nor `room:direction`.
    #[error("{owner}: invalid lock target \"{target}\"")]
    InvalidLockTarget {
        /// Human-readable description of the referencing entity.
        owner: String,
        /// The offending target string.
        target: String,
    },

    /// A speakable NPC lacks the `start` dialogue node.
    #[error("npc \"{0}\" has dialogue but no \"start\" node")]
    MissingStartNode(String),

    /// A field required by the given effect, action, or reward kind is absent.
    #[error("{owner}: missing {field}")]
    MissingField {
        /// Human-readable description of the entity.
        owner: String,
        /// The missing field.
        field: &'static str,
    },
}

/// Configuration problems with an otherwise well-formed document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// One or more required default responses are absent.
    #[error("missing default responses: {}", .0.join(", "))]
    MissingDefaultResponses(Vec<String>),

    /// Following alias targets leads back to an alias already visited.
    #[error("cyclic alias table: {}", .0.join(" -> "))]
    AliasCycle(Vec<String>),

    /// Puzzle prerequisites form a cycle.
    #[error("cyclic puzzle prerequisites: {}", .0.join(" -> "))]
    PuzzleCycle(Vec<String>),
}

/// Any reason a world document failed to load.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    /// Structural problem.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Configuration problem.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl From<serde_json::Error> for LoadError {
    fn from(err: serde_json::Error) -> Self {
        Self::Schema(SchemaError::Malformed(err.to_string()))
    }
}
