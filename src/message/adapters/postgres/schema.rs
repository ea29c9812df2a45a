//! Diesel schema for message persistence.

diesel::table! {
    /// Chat message records.
    messages (id) {
        /// Message identifier.
        id -> Uuid,
        /// Authoring user.
        sender -> Uuid,
        /// Receiving user.
        recipient -> Uuid,
        /// Conversation grouping, if any.
        chat_id -> Nullable<Uuid>,
        /// Text payload, if any.
        content -> Nullable<Text>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
