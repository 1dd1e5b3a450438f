//! Prompt generation from a completed form.
//!
//! Every document is a fixed template with form answers interpolated. Missing
//! answers become bracketed placeholders, so generation never fails. The
//! output depends only on the `FormData` passed in.

use std::borrow::Cow;

use reqform_types::form::{FieldValue, FormData};
use reqform_types::prompt::GeneratedPrompts;

const NOT_SPECIFIED: &str = "[Not specified]";

/// Build all four prompt documents.
pub fn generate_prompts(data: &FormData) -> GeneratedPrompts {
    tracing::debug!(fields = data.len(), "generating prompts");
    GeneratedPrompts {
        business: business_prompt(data),
        audience: audience_prompt(data),
        technical: technical_prompt(data),
        master: master_prompt(data),
    }
}

// ---------------------------------------------------------------------------
// Slot helpers
// ---------------------------------------------------------------------------

/// Value for a text slot. Lists render comma-joined; absent or empty answers
/// use `fallback`.
fn slot<'a>(data: &'a FormData, field: &str, fallback: &'a str) -> Cow<'a, str> {
    match data.get(field) {
        Some(FieldValue::Text(text)) if !text.is_empty() => Cow::Borrowed(text),
        Some(FieldValue::Multi(items)) if !items.is_empty() => Cow::Owned(items.join(", ")),
        _ => Cow::Borrowed(fallback),
    }
}

/// Value for a list slot. Anything that is not a list is "[Not specified]".
fn list<'a>(data: &'a FormData, field: &str) -> Cow<'a, str> {
    match data.get(field) {
        Some(FieldValue::Multi(items)) => Cow::Owned(items.join(", ")),
        _ => Cow::Borrowed(NOT_SPECIFIED),
    }
}

// ---------------------------------------------------------------------------
// Templates
// ---------------------------------------------------------------------------

pub fn business_prompt(data: &FormData) -> String {
    format!(
        r#"🏢 BUSINESS STRATEGY ANALYSIS for {company}

Industry: {industry}
Business Size: {size}
Primary Goal: {goal}
Years in Business: {years}

Business Context:
{story}

Competitive Intelligence:
{competition}

Business Model:
{model}

RESEARCH TASKS:
1. Analyze {industry_inline} market trends and opportunities
2. Develop competitive positioning strategy
3. Create scalable business model recommendations
4. Design growth strategy aligned with {goal_inline}

DELIVERABLES:
- Market opportunity analysis
- Competitive advantage framework
- Revenue optimization strategy
- 3-year growth roadmap
"#,
        company = slot(data, "companyName", "[Company]"),
        industry = slot(data, "industry", NOT_SPECIFIED),
        size = slot(data, "businessSize", NOT_SPECIFIED),
        goal = slot(data, "primaryGoal", NOT_SPECIFIED),
        years = slot(data, "yearsInBusiness", "5"),
        story = slot(data, "businessStory", "[Business story not provided]"),
        competition = slot(
            data,
            "competitiveIntelligence",
            "[Competitive analysis not provided]"
        ),
        model = slot(data, "businessModel", "[Business model not provided]"),
        industry_inline = slot(data, "industry", "industry"),
        goal_inline = slot(data, "primaryGoal", "primary goal"),
    )
}

pub fn audience_prompt(data: &FormData) -> String {
    format!(
        r#"👥 USER EXPERIENCE & AUDIENCE STRATEGY

Target Demographics: {ages}
Tech Comfort Level: {tech}
Contact Preferences: {contact}

Customer Profiles:
{profiles}

Pain Points:
{pain_points}

Customer Journey:
{journey}

RESEARCH TASKS:
1. Create detailed user personas with psychological profiles
2. Map complete customer journey with touchpoints
3. Design conversion optimization strategy
4. Develop accessibility and usability framework

DELIVERABLES:
- User persona development
- Journey mapping and optimization
- UX strategy and wireframes
- Conversion rate optimization plan
"#,
        ages = list(data, "customerAge"),
        tech = slot(data, "techSavviness", NOT_SPECIFIED),
        contact = list(data, "contactPreference"),
        profiles = slot(data, "customerProfiles", "[Customer profiles not provided]"),
        pain_points = slot(data, "customerPainPoints", "[Pain points not provided]"),
        journey = slot(data, "customerJourney", "[Customer journey not provided]"),
    )
}

pub fn technical_prompt(data: &FormData) -> String {
    format!(
        r#"⚡ TECHNICAL ARCHITECTURE STRATEGY

Primary Goal: {goal}
Business Scale: {scale}

TECHNICAL REQUIREMENTS:
1. Performance optimization for Core Web Vitals
2. Mobile-first responsive design
3. Scalable architecture for growth
4. Security and compliance implementation

DELIVERABLES:
- System architecture blueprint
- Technology stack recommendations
- Performance optimization plan
- Security and compliance framework
"#,
        goal = slot(data, "primaryGoal", NOT_SPECIFIED),
        scale = slot(data, "businessSize", NOT_SPECIFIED),
    )
}

/// Integration brief. Only the company name and industry are interpolated;
/// the rest is fixed text.
pub fn master_prompt(data: &FormData) -> String {
    format!(
        r#"🎯 MASTER STRATEGIC INTEGRATION

Company: {company}
Industry: {industry}

INTEGRATION OBJECTIVES:
1. Unify business strategy with technical implementation
2. Align user experience with business goals
3. Create comprehensive implementation roadmap
4. Establish success measurement framework

MASTER DELIVERABLES:
- Executive strategic brief
- Comprehensive implementation roadmap
- Success measurement framework
- ROI optimization strategy

TARGET OUTCOMES:
- 40% improvement in key business metrics
- Top 10% industry positioning
- Sustainable competitive advantage
- Measurable ROI within 12 months
"#,
        company = slot(data, "companyName", "[Company Name]"),
        industry = slot(data, "industry", "[Industry]"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn acme() -> FormData {
        [("companyName", "Acme"), ("industry", "Retail")]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_business_prompt_scenario() {
        let business = business_prompt(&acme());

        assert!(business.starts_with("🏢 BUSINESS STRATEGY ANALYSIS for Acme\n"));
        assert!(business.contains("Industry: Retail\n"));
        assert!(business.contains("Business Size: [Not specified]\n"));
        assert!(business.contains("1. Analyze Retail market trends and opportunities"));
        assert!(business.contains("4. Design growth strategy aligned with primary goal"));
    }

    #[test]
    fn test_empty_form_uses_placeholders() {
        let prompts = generate_prompts(&FormData::new());

        assert!(prompts.business.contains("for [Company]\n"));
        assert!(prompts.business.contains("Years in Business: 5\n"));
        assert!(prompts.business.contains("[Business story not provided]"));
        assert!(prompts.business.contains("[Competitive analysis not provided]"));
        assert!(prompts.business.contains("[Business model not provided]"));
        assert!(prompts.business.contains("1. Analyze industry market trends"));

        assert!(prompts.audience.contains("Target Demographics: [Not specified]\n"));
        assert!(prompts.audience.contains("Contact Preferences: [Not specified]\n"));
        assert!(prompts.audience.contains("[Customer journey not provided]"));

        assert!(prompts.technical.contains("Primary Goal: [Not specified]\n"));
        assert!(prompts.master.contains("Company: [Company Name]\n"));
        assert!(prompts.master.contains("Industry: [Industry]\n"));
    }

    #[test]
    fn test_empty_string_counts_as_missing() {
        let data: FormData = [("companyName", "")].into_iter().collect();
        assert!(business_prompt(&data).contains("for [Company]\n"));
    }

    #[test]
    fn test_list_answer_in_text_slot() {
        let mut data = FormData::new();
        data.set("businessSize", vec!["Solo", "Small (2-10)"]);
        assert!(business_prompt(&data).contains("Business Size: Solo, Small (2-10)\n"));

        data.set("businessSize", FieldValue::Multi(Vec::new()));
        assert!(business_prompt(&data).contains("Business Size: [Not specified]\n"));
    }

    #[test]
    fn test_demographics_render_comma_joined() {
        let mut data = FormData::new();
        data.set("customerAge", vec!["18-24", "25-34"]);

        let audience = audience_prompt(&data);
        assert!(audience.contains("Target Demographics: 18-24, 25-34\n"));
    }

    #[test]
    fn test_list_slot_rejects_plain_string() {
        let data: FormData = [("contactPreference", "Email")].into_iter().collect();
        assert!(audience_prompt(&data).contains("Contact Preferences: [Not specified]\n"));
    }

    #[test]
    fn test_master_ignores_other_answers() {
        let mut data = acme();
        let before = master_prompt(&data);
        data.set("businessStory", "Founded in a garage");
        data.set("primaryGoal", "Sell Online");
        assert_eq!(master_prompt(&data), before);
        assert!(before.contains("Company: Acme\n"));
    }

    #[test]
    fn test_generation_is_deterministic() {
        let mut data = acme();
        data.set("customerAge", vec!["35-44"]);
        data.set("unknownField", "kept but unused");

        let first = generate_prompts(&data);
        let second = generate_prompts(&data.clone());
        assert_eq!(first, second);
    }

    #[test]
    fn test_documents_end_with_single_newline() {
        for (_, text) in generate_prompts(&acme()).iter() {
            assert!(text.ends_with('\n'));
            assert!(!text.ends_with("\n\n"));
        }
    }
}
