// src/sentence.rs
//
// Turns the extracted subject list into the spoken reply.

/// Fixed sentence opener. A reply that is exactly this prefix means no
/// periods were extracted; callers wanting a friendlier "no classes" message
/// must check for it themselves.
pub const PREFIX: &str = "You have ";

/// Join subjects into the reply sentence, in input order.
///
/// The shape is the assistant's historical output, reproduced exactly:
/// every non-final subject gets `", "`, the final one gets `"and …."`.
/// That means a single subject comes out as "You have and Math." and an
/// empty list as the bare prefix. Both look like upstream formatting bugs,
/// but they are the observed contract (see DESIGN.md), so they stay.
pub fn compose(subjects: &[String]) -> String {
    let mut msg = s!(PREFIX);
    let n = subjects.len();
    for (i, subject) in subjects.iter().enumerate() {
        if i + 1 == n {
            msg.push_str(&join!("and ", subject.as_str(), "."));
            break;
        }
        msg.push_str(&join!(subject.as_str(), ", "));
    }
    msg
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subjects(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| s!(*n)).collect()
    }

    #[test]
    fn four_subjects_enumerate_with_oxford_and() {
        let out = compose(&subjects(&["Math", "Science", "Psychology", "English"]));
        assert_eq!(out, "You have Math, Science, Psychology, and English.");
    }

    #[test]
    fn two_subjects() {
        assert_eq!(compose(&subjects(&["Math", "Science"])), "You have Math, and Science.");
    }

    #[test]
    fn empty_list_is_bare_prefix() {
        assert_eq!(compose(&[]), "You have ");
    }

    #[test]
    fn single_subject_keeps_historical_shape() {
        assert_eq!(compose(&subjects(&["History"])), "You have and History.");
    }

    #[test]
    fn always_starts_with_prefix_and_ends_with_one_period() {
        for n in 2..6 {
            let list: Vec<String> = (0..n).map(|i| format!("S{i}")).collect();
            let out = compose(&list);
            assert!(out.starts_with(PREFIX));
            assert!(out.ends_with('.'));
            assert!(!out.ends_with(".."));
        }
    }
}
