use kartuli_core::model::CourseKind;
use kartuli_core::progress::CourseUnlockStatus;
use services::CourseOverview;

/// UI-ready representation of a course card on the home screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CourseCardVm {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub avatar: String,
    /// Progress not read yet: neither open nor locked is known.
    pub is_loading: bool,
    pub is_unlocked: bool,
    pub lock_label: Option<String>,
    /// `None` while progress is still loading.
    pub progress_label: Option<String>,
    pub percentage: Option<u8>,
}

#[must_use]
pub fn map_course_cards(overviews: &[CourseOverview]) -> Vec<CourseCardVm> {
    overviews.iter().map(map_course_card).collect()
}

#[must_use]
pub fn map_course_card(overview: &CourseOverview) -> CourseCardVm {
    let avatar = match overview.kind {
        CourseKind::Alphabet => "ა".to_string(),
        CourseKind::Numbers => "1".to_string(),
        CourseKind::Phrases => overview
            .title
            .chars()
            .next()
            .map_or_else(|| "?".to_string(), |ch| ch.to_string()),
    };

    let is_loading = overview.percentage.is_none();
    CourseCardVm {
        slug: overview.id.to_string(),
        title: overview.title.clone(),
        description: overview.description.clone(),
        avatar,
        is_loading,
        is_unlocked: !is_loading && overview.unlock.is_unlocked,
        lock_label: if is_loading {
            None
        } else {
            lock_label(&overview.unlock)
        },
        progress_label: overview
            .percentage
            .map(|pct| format!("{} / {} learned · {pct}%", overview.learned, overview.total)),
        percentage: overview.percentage,
    }
}

/// Prompt shown on a locked course.
#[must_use]
pub fn lock_label(unlock: &CourseUnlockStatus) -> Option<String> {
    if unlock.is_unlocked {
        return None;
    }
    Some(match unlock.required_course_title.as_deref() {
        Some(title) => format!("Complete {title} to unlock"),
        None => "Locked".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use kartuli_core::model::CourseId;

    fn overview(percentage: Option<u8>, unlock: CourseUnlockStatus) -> CourseOverview {
        CourseOverview {
            id: CourseId::new("numbers").unwrap(),
            title: "Numbers".to_string(),
            description: "Counting".to_string(),
            kind: CourseKind::Numbers,
            learned: 9,
            total: 18,
            percentage,
            unlock,
        }
    }

    #[test]
    fn hides_progress_until_loaded() {
        let card = map_course_card(&overview(None, CourseUnlockStatus::unlocked()));
        assert_eq!(card.progress_label, None);
        assert_eq!(card.lock_label, None);
        assert_eq!(card.slug, "numbers");
        assert!(card.is_loading);
    }

    #[test]
    fn hides_lock_prompt_until_loaded() {
        let locked = CourseUnlockStatus {
            is_unlocked: false,
            required_course_title: Some("Alphabet".to_string()),
        };
        let card = map_course_card(&overview(None, locked.clone()));
        assert!(card.is_loading);
        assert!(!card.is_unlocked);
        assert_eq!(card.lock_label, None);

        let card = map_course_card(&overview(Some(0), locked));
        assert!(!card.is_loading);
        assert_eq!(card.lock_label.as_deref(), Some("Complete Alphabet to unlock"));
    }

    #[test]
    fn shows_progress_and_lock_prompt() {
        let card = map_course_card(&overview(
            Some(50),
            CourseUnlockStatus {
                is_unlocked: false,
                required_course_title: Some("Alphabet".to_string()),
            },
        ));
        assert_eq!(card.progress_label.as_deref(), Some("9 / 18 learned · 50%"));
        assert_eq!(card.lock_label.as_deref(), Some("Complete Alphabet to unlock"));
        assert!(!card.is_unlocked);
        assert!(!card.is_loading);
    }
}
