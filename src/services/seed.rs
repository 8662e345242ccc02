use crate::models::Profile;

/// Built-in pool used when the participant store is missing, failing or empty
pub fn seed_pool() -> Vec<Profile> {
    vec![
        seed("Ava", "@ava#1234", &["FE"], &["React", "Tailwind"], &["AI"], "Full weekend"),
        seed("Ray", "@ray#4321", &["BE"], &["FastAPI", "Postgres"], &["Health"], "Evenings only"),
        seed("Mia", "@mia#9999", &["ML/AI"], &["Python", "PyTorch"], &["Social Good"], "Flexible"),
    ]
}

fn seed(
    name: &str,
    contact: &str,
    roles: &[&str],
    skills: &[&str],
    interests: &[&str],
    availability: &str,
) -> Profile {
    Profile {
        hackathon: "SCE 2025".to_string(),
        name: name.to_string(),
        contact: contact.to_string(),
        roles: roles.iter().map(|s| s.to_string()).collect(),
        skills: skills.iter().map(|s| s.to_string()).collect(),
        interests: interests.iter().map(|s| s.to_string()).collect(),
        availability: availability.to_string(),
        blurb: String::new(),
    }
}
