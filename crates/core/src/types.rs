/// Store-assigned primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// Principals are identified by the identity provider's UUID.
pub type UserId = uuid::Uuid;
