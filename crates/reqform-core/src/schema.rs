//! Static layout of the six-step requirements form.
//!
//! Each step lists the fields it collects and how they are entered. The
//! controller validates exactly the fields of the current step; the terminal
//! surface uses the kinds and option lists to pick a widget.

use reqform_types::form::TOTAL_STEPS;

/// How a field is entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Single-line free text.
    Text,
    /// Multi-line free text with a live character count.
    TextArea,
    /// Single choice from a dropdown.
    Select(&'static [&'static str]),
    /// Single choice from radio buttons.
    Radio(&'static [&'static str]),
    /// Any number of choices; stored as a list.
    Checkbox(&'static [&'static str]),
    /// Integer slider, stored as its decimal string.
    Range { min: u32, max: u32, default: u32 },
}

impl FieldKind {
    /// Whether the field stores a list rather than a single string.
    pub fn is_multi(&self) -> bool {
        matches!(self, FieldKind::Checkbox(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDefinition {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepDefinition {
    pub number: u8,
    pub title: &'static str,
    pub fields: &'static [FieldDefinition],
}

impl StepDefinition {
    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|f| f.name)
    }
}

const INDUSTRIES: &[&str] = &[
    "Retail",
    "Professional Services",
    "Healthcare",
    "Technology",
    "Hospitality",
    "Manufacturing",
    "Education",
    "Non-profit",
    "Other",
];

const BUSINESS_SIZES: &[&str] = &[
    "Solo",
    "Small (2-10)",
    "Medium (11-50)",
    "Large (51-200)",
    "Enterprise (200+)",
];

const PRIMARY_GOALS: &[&str] = &[
    "Generate Leads",
    "Sell Online",
    "Build Brand Awareness",
    "Provide Information",
    "Book Appointments",
];

const AGE_GROUPS: &[&str] = &["18-24", "25-34", "35-44", "45-54", "55-64", "65+"];

const TECH_COMFORT: &[&str] = &["Low", "Moderate", "High"];

const CONTACT_CHANNELS: &[&str] = &["Phone", "Email", "Live Chat", "Social Media", "In Person"];

const FEATURES: &[&str] = &[
    "Online Store",
    "Booking System",
    "Blog",
    "Contact Forms",
    "Customer Portal",
    "Newsletter Signup",
];

const CONTENT_READINESS: &[&str] = &["Ready", "Partially Ready", "Need Help"];

const TIMELINES: &[&str] = &["ASAP", "1-3 months", "3-6 months", "Flexible"];

const BUDGETS: &[&str] = &["Under $5k", "$5k-$15k", "$15k-$50k", "$50k+"];

/// The six steps, in order. `STEPS[n - 1].number == n`.
pub static STEPS: [StepDefinition; TOTAL_STEPS as usize] = [
    StepDefinition {
        number: 1,
        title: "Business Foundation",
        fields: &[
            FieldDefinition {
                name: "companyName",
                label: "Company Name",
                kind: FieldKind::Text,
            },
            FieldDefinition {
                name: "industry",
                label: "Industry",
                kind: FieldKind::Select(INDUSTRIES),
            },
            FieldDefinition {
                name: "businessSize",
                label: "Business Size",
                kind: FieldKind::Radio(BUSINESS_SIZES),
            },
            FieldDefinition {
                name: "yearsInBusiness",
                label: "Years in Business",
                kind: FieldKind::Range {
                    min: 0,
                    max: 50,
                    default: 5,
                },
            },
            FieldDefinition {
                name: "primaryGoal",
                label: "Primary Website Goal",
                kind: FieldKind::Select(PRIMARY_GOALS),
            },
        ],
    },
    StepDefinition {
        number: 2,
        title: "Business Story",
        fields: &[
            FieldDefinition {
                name: "businessStory",
                label: "Business Story",
                kind: FieldKind::TextArea,
            },
            FieldDefinition {
                name: "competitiveIntelligence",
                label: "Competitive Intelligence",
                kind: FieldKind::TextArea,
            },
            FieldDefinition {
                name: "businessModel",
                label: "Business Model",
                kind: FieldKind::TextArea,
            },
        ],
    },
    StepDefinition {
        number: 3,
        title: "Target Audience",
        fields: &[
            FieldDefinition {
                name: "customerAge",
                label: "Customer Age Groups",
                kind: FieldKind::Checkbox(AGE_GROUPS),
            },
            FieldDefinition {
                name: "techSavviness",
                label: "Tech Comfort Level",
                kind: FieldKind::Radio(TECH_COMFORT),
            },
            FieldDefinition {
                name: "contactPreference",
                label: "Contact Preferences",
                kind: FieldKind::Checkbox(CONTACT_CHANNELS),
            },
        ],
    },
    StepDefinition {
        number: 4,
        title: "Customer Insight",
        fields: &[
            FieldDefinition {
                name: "customerProfiles",
                label: "Customer Profiles",
                kind: FieldKind::TextArea,
            },
            FieldDefinition {
                name: "customerPainPoints",
                label: "Customer Pain Points",
                kind: FieldKind::TextArea,
            },
            FieldDefinition {
                name: "customerJourney",
                label: "Customer Journey",
                kind: FieldKind::TextArea,
            },
        ],
    },
    StepDefinition {
        number: 5,
        title: "Features & Content",
        fields: &[
            FieldDefinition {
                name: "desiredFeatures",
                label: "Desired Features",
                kind: FieldKind::Checkbox(FEATURES),
            },
            FieldDefinition {
                name: "contentReadiness",
                label: "Content Readiness",
                kind: FieldKind::Radio(CONTENT_READINESS),
            },
            FieldDefinition {
                name: "integrations",
                label: "Integrations",
                kind: FieldKind::TextArea,
            },
        ],
    },
    StepDefinition {
        number: 6,
        title: "Timeline & Budget",
        fields: &[
            FieldDefinition {
                name: "launchTimeline",
                label: "Launch Timeline",
                kind: FieldKind::Radio(TIMELINES),
            },
            FieldDefinition {
                name: "budgetRange",
                label: "Budget Range",
                kind: FieldKind::Radio(BUDGETS),
            },
            FieldDefinition {
                name: "additionalNotes",
                label: "Additional Notes",
                kind: FieldKind::TextArea,
            },
        ],
    },
];

/// Look up a step by its 1-based number.
pub fn step(number: u8) -> Option<&'static StepDefinition> {
    let index = usize::from(number).checked_sub(1)?;
    STEPS.get(index)
}

/// Look up a field anywhere in the form.
pub fn field(name: &str) -> Option<&'static FieldDefinition> {
    STEPS
        .iter()
        .flat_map(|s| s.fields.iter())
        .find(|f| f.name == name)
}

/// Display label for the years-in-business slider.
pub fn years_label(years: u32) -> String {
    match years {
        0 => "New".to_string(),
        50 => "50+ years".to_string(),
        n => format!("{n} years"),
    }
}
