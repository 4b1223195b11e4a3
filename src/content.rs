use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utoipa::ToSchema;

/// Site content module
///
/// The informational sections of the landing page are fixed copy with no
/// persistence behind them, so they are served from these in-memory
/// definitions. The frontend renders the sections in the order they appear
/// in `SiteContent`: hero, about, services, testimonials, contact CTA
/// (the portfolio gallery and contact form have their own endpoints).

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct HeroSection {
    pub heading: String,
    pub subheading: String,
    pub primary_cta: String,
    pub secondary_cta: String,
    pub availability_note: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct AboutSection {
    pub heading: String,
    pub body: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct ServiceOffering {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct Testimonial {
    pub quote: String,
    pub attribution: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct ContactCta {
    pub heading: String,
    pub body: String,
    pub cta_label: String,
}

/// SiteContent
///
/// All static sections of the landing page, in display order.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct SiteContent {
    pub hero: HeroSection,
    pub about: AboutSection,
    pub services: Vec<ServiceOffering>,
    pub testimonials: Vec<Testimonial>,
    pub contact_cta: ContactCta,
}

/// The canonical site copy.
pub fn site_content() -> SiteContent {
    SiteContent {
        hero: HeroSection {
            heading: "Crafting Bold Visual Identities".to_string(),
            subheading: "I help brands stand out through strategic design: logos, \
                         branding systems, packaging, posters, and digital experiences."
                .to_string(),
            primary_cta: "View Portfolio".to_string(),
            secondary_cta: "Get in touch".to_string(),
            availability_note: "Available for freelance projects and collaborations."
                .to_string(),
        },
        about: AboutSection {
            heading: "About the studio".to_string(),
            body: "Bin Hafiz Graphics is a one-person design studio focused on brand \
                   identity and print. Every engagement runs from first sketch to \
                   production-ready files, with a bias for bold, durable marks."
                .to_string(),
        },
        services: vec![
            ServiceOffering {
                title: "Brand Identity".to_string(),
                description: "Naming, color systems, typography, and brand guidelines."
                    .to_string(),
            },
            ServiceOffering {
                title: "Logo Design".to_string(),
                description: "Distinctive, scalable marks built to last.".to_string(),
            },
            ServiceOffering {
                title: "Packaging".to_string(),
                description: "Shelf-ready packaging with impact and clarity.".to_string(),
            },
            ServiceOffering {
                title: "UI Visuals".to_string(),
                description: "Landing pages and app visuals that convert.".to_string(),
            },
            ServiceOffering {
                title: "Print & Posters".to_string(),
                description: "Editorial layouts, posters, and marketing collateral."
                    .to_string(),
            },
            ServiceOffering {
                title: "Social Kits".to_string(),
                description: "Templates and asset packs for social media.".to_string(),
            },
        ],
        testimonials: vec![
            Testimonial {
                quote: "Elevated our brand beyond expectations.".to_string(),
                attribution: "Ayesha, Founder".to_string(),
            },
            Testimonial {
                quote: "Fast, thoughtful, and impeccably crafted.".to_string(),
                attribution: "Usman, Product Lead".to_string(),
            },
            Testimonial {
                quote: "A strong partner from concept to final delivery.".to_string(),
                attribution: "Sara, Marketing".to_string(),
            },
        ],
        contact_cta: ContactCta {
            heading: "Have a project in mind?".to_string(),
            body: "Tell me about your project and I'll get back to you within 24 hours."
                .to_string(),
            cta_label: "Send Project Inquiry".to_string(),
        },
    }
}
