//! Demo fixtures for the in-memory backend.
//!
//! One admin, one host, one agent, the nine default categories, and a
//! couple of live registrations so a freshly started instance has
//! something to browse. Windows are relative to startup time so the
//! fixtures stay effectively active.

use chrono::{Duration, Utc};
use uuid::Uuid;

use domain::models::registration::{
    FieldType, FormField, PublishDuration, Registration, RegistrationStatus, Visibility,
};
use domain::models::user::UserRole;
use domain::models::{Category, User};

use super::MemoryBackend;

pub const ADMIN_EMAIL: &str = "admin@regos.app";
pub const HOST_EMAIL: &str = "host@example.com";
pub const AGENT_EMAIL: &str = "agent@example.com";

/// Loads the fixtures into the backend.
pub fn load(backend: &MemoryBackend) {
    let mut state = match backend.state.write() {
        Ok(state) => state,
        Err(_) => return,
    };

    let now = Utc::now();

    let admin = User {
        id: Uuid::new_v4(),
        email: ADMIN_EMAIL.to_string(),
        name: "Platform Admin".to_string(),
        phone: Some("9876543210".to_string()),
        role: UserRole::Admin,
        verified: true,
        created_at: now - Duration::days(400),
    };
    let host = User {
        id: Uuid::new_v4(),
        email: HOST_EMAIL.to_string(),
        name: "Event Organizer Pro".to_string(),
        phone: Some("9876543211".to_string()),
        role: UserRole::Host,
        verified: true,
        created_at: now - Duration::days(200),
    };
    let agent = User {
        id: Uuid::new_v4(),
        email: AGENT_EMAIL.to_string(),
        name: "John Agent".to_string(),
        phone: Some("9876543212".to_string()),
        role: UserRole::Agent,
        verified: true,
        created_at: now - Duration::days(100),
    };

    for category in default_categories() {
        state.categories.push(category);
    }

    let summit = Registration {
        id: Uuid::new_v4(),
        host_id: host.id,
        host_name: host.name.clone(),
        title: "Tech Innovation Summit".to_string(),
        description: "Join the biggest tech conference of the year! Network with \
                      industry leaders, attend workshops, and discover the latest \
                      innovations in AI, blockchain, and cloud computing."
            .to_string(),
        category: "events".to_string(),
        visibility: Visibility::Public,
        duration: PublishDuration::ThirtyDays,
        status: RegistrationStatus::Active,
        start_date: now - Duration::days(2),
        end_date: now + Duration::days(28),
        view_count: 1250,
        submission_count: 0,
        featured: true,
        verified: true,
        form_schema: vec![
            text_field("f1", "Full Name", true),
            FormField {
                id: "f2".to_string(),
                field_type: FieldType::Email,
                label: "Email Address".to_string(),
                required: true,
                placeholder: Some("your@email.com".to_string()),
                options: None,
            },
            FormField {
                id: "f3".to_string(),
                field_type: FieldType::Phone,
                label: "Phone Number".to_string(),
                required: true,
                placeholder: Some("9876543210".to_string()),
                options: None,
            },
            FormField {
                id: "f4".to_string(),
                field_type: FieldType::Select,
                label: "Session Preference".to_string(),
                required: true,
                placeholder: None,
                options: Some(vec![
                    "AI Workshop".to_string(),
                    "Blockchain 101".to_string(),
                    "Cloud Architecture".to_string(),
                    "All Sessions".to_string(),
                ]),
            },
            FormField {
                id: "f5".to_string(),
                field_type: FieldType::Textarea,
                label: "Why do you want to attend?".to_string(),
                required: false,
                placeholder: Some("Tell us about yourself...".to_string()),
                options: None,
            },
        ],
        created_at: now - Duration::days(2),
    };

    let masterclass = Registration {
        id: Uuid::new_v4(),
        host_id: host.id,
        host_name: host.name.clone(),
        title: "Photography Masterclass".to_string(),
        description: "Learn professional photography techniques from award-winning \
                      photographers. This hands-on workshop covers composition, \
                      lighting, and post-processing."
            .to_string(),
        category: "education".to_string(),
        visibility: Visibility::Public,
        duration: PublishDuration::FifteenDays,
        status: RegistrationStatus::Active,
        start_date: now - Duration::days(1),
        end_date: now + Duration::days(14),
        view_count: 567,
        submission_count: 0,
        featured: true,
        verified: true,
        form_schema: vec![
            text_field("f1", "Full Name", true),
            FormField {
                id: "f2".to_string(),
                field_type: FieldType::Email,
                label: "Email".to_string(),
                required: true,
                placeholder: None,
                options: None,
            },
            FormField {
                id: "f3".to_string(),
                field_type: FieldType::Select,
                label: "Experience Level".to_string(),
                required: true,
                placeholder: None,
                options: Some(vec![
                    "Beginner".to_string(),
                    "Intermediate".to_string(),
                    "Advanced".to_string(),
                ]),
            },
            FormField {
                id: "f4".to_string(),
                field_type: FieldType::Checkbox,
                label: "I have my own camera".to_string(),
                required: false,
                placeholder: None,
                options: None,
            },
        ],
        created_at: now - Duration::days(1),
    };

    state.users.insert(admin.id, admin);
    state.users.insert(host.id, host);
    state.users.insert(agent.id, agent);
    state.registrations.insert(summit.id, summit);
    state.registrations.insert(masterclass.id, masterclass);
}

fn text_field(id: &str, label: &str, required: bool) -> FormField {
    FormField {
        id: id.to_string(),
        field_type: FieldType::Text,
        label: label.to_string(),
        required,
        placeholder: None,
        options: None,
    }
}

fn default_categories() -> Vec<Category> {
    [
        ("events", "Events", "Calendar", "Conferences, workshops, and gatherings", false),
        ("appointments", "Appointments", "Clock", "Scheduled meetings and bookings", false),
        ("registrations", "Registrations", "FileText", "General form registrations", false),
        ("vehicles", "Vehicle Registry", "Car", "VIN and vehicle registrations", false),
        ("education", "Education", "GraduationCap", "Courses, exams, and admissions", false),
        ("government", "Government", "Building2", "Official government services", false),
        ("healthcare", "Healthcare", "HeartPulse", "Medical and health services", false),
        ("business", "Business", "Briefcase", "Business and corporate registrations", false),
        ("platform", "Platform Information", "Info", "Official platform content", true),
    ]
    .into_iter()
    .map(|(id, name, icon, description, admin_only)| Category {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        icon: icon.to_string(),
        admin_only,
        count: 0,
    })
    .collect()
}
