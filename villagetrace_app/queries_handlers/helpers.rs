use villagetrace_types::errors::AppError;

/// World ids end up in URLs and file names: `de238`, `dec12`, `dep7`...
pub(super) fn validate_world(world: &str) -> Result<(), AppError> {
    if world.is_empty() || !world.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(AppError::InvalidArgument(format!(
            "world {world:?} must be a non-empty alphanumeric id"
        )));
    }
    Ok(())
}
