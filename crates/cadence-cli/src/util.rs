use cadence_core::error::CoreError;
use cadence_core::repository::EventRepository;
use uuid::Uuid;

/// Resolves a full UUID or a unique hex prefix to an event id.
pub async fn resolve_event_id(
    repo: &impl EventRepository,
    input: &str,
) -> Result<Uuid, CoreError> {
    if let Ok(id) = input.parse::<Uuid>() {
        return Ok(id);
    }

    let matches = repo.find_events_by_id_prefix(input).await?;
    match matches.len() {
        0 => Err(CoreError::NotFound(format!(
            "No event matches id '{input}'"
        ))),
        1 => Ok(matches[0].id),
        _ => Err(CoreError::AmbiguousId(
            matches
                .iter()
                .map(|event| {
                    (
                        event.id.simple().to_string()[..8].to_string(),
                        event.title.clone(),
                    )
                })
                .collect(),
        )),
    }
}
