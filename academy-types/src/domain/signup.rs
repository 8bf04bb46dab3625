//! Enrollment signup.

use super::phone::PhoneNumber;

/// A validated signup: who to greet and which numbers to notify.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signup {
    pub name: String,
    pub student_phone: PhoneNumber,
    pub parent_phone: Option<PhoneNumber>,
}

impl Signup {
    /// Welcome text sent to the student.
    pub fn student_message(&self, academy: &str) -> String {
        format!(
            "Hello {}, thank you for signing up at {}!",
            self.name, academy
        )
    }

    /// Confirmation text sent to the parent or guardian.
    pub fn parent_message(&self, academy: &str) -> String {
        format!(
            "Your child {} has registered successfully at {}.",
            self.name, academy
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let signup = Signup {
            name: "Riya".into(),
            student_phone: PhoneNumber::parse("9876543210").unwrap(),
            parent_phone: None,
        };

        assert_eq!(
            signup.student_message("Shreyas Academy"),
            "Hello Riya, thank you for signing up at Shreyas Academy!"
        );
        assert_eq!(
            signup.parent_message("Shreyas Academy"),
            "Your child Riya has registered successfully at Shreyas Academy."
        );
    }
}
