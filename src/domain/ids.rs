use uuid::Uuid;

const TEMP_PREFIXES: [&str; 2] = ["temp-", "tmp-"];

/// Source of permanent identifiers.
pub trait IdGenerator {
    fn next_id(&mut self) -> String;
}

/// Default generator producing UUID v4 strings.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&mut self) -> String {
        Uuid::new_v4().to_string()
    }
}

impl<F> IdGenerator for F
where
    F: FnMut() -> String,
{
    fn next_id(&mut self) -> String {
        self()
    }
}

/// Creates a client-side placeholder id for a record that has not been persisted yet.
pub fn temp_id() -> String {
    format!("temp-{}", Uuid::new_v4())
}

pub fn is_temporary_id(id: &str) -> bool {
    TEMP_PREFIXES.iter().any(|prefix| id.starts_with(prefix))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temp_ids_are_recognized() {
        assert!(is_temporary_id(&temp_id()));
        assert!(is_temporary_id("tmp-1"));
        assert!(!is_temporary_id(&UuidGenerator.next_id()));
    }

    #[test]
    fn prefix_must_end_with_a_dash() {
        assert!(!is_temporary_id("template-groceries"));
        assert!(!is_temporary_id("tmpfund"));
        assert!(!is_temporary_id("temp"));
    }

    #[test]
    fn closures_act_as_generators() {
        let mut counter = 0;
        let mut ids = || {
            counter += 1;
            format!("id-{counter}")
        };
        assert_eq!(ids.next_id(), "id-1");
        assert_eq!(ids.next_id(), "id-2");
    }
}
