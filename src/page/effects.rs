use cineshelf_common::EntityId;

use super::PageProps;

/// One step a session performs in reaction to new props.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Replace the translation store with the overrides of the new data.
    PushTranslations,
    /// Recompute the displayed data from the new props' data.
    ProjectData,
    /// Load `id` again in `language`.
    Refetch { id: EntityId, language: String },
}

/// Effects caused by moving from `prev` to `next`, in execution order.
///
/// - translations are always pushed;
/// - a different entity id, with data on both sides, is projected;
/// - a change of either language input, with data present and an api call
///   configured, triggers a re-fetch of the current entity in the new
///   resolved language.
pub fn plan_update(prev: &PageProps, next: &PageProps, has_api_call: bool) -> Vec<Effect> {
    let mut effects = vec![Effect::PushTranslations];

    if let (Some(old), Some(new)) = (&prev.data, &next.data) {
        if old.id != new.id {
            effects.push(Effect::ProjectData);
        }
    }

    let languages_changed = prev.inputs.languages != next.inputs.languages;
    if languages_changed && has_api_call {
        if let Some(data) = &next.data {
            effects.push(Effect::Refetch {
                id: data.id.clone(),
                language: next.inputs.languages.resolved().to_string(),
            });
        }
    }

    effects
}
