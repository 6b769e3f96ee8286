//! Delivery-method specifications.

use crate::specification::DeliveryDescriptor;
use serde::Serialize;

const FALLBACK_METHOD: &str = "online_asynchronous";

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct MethodSpecification {
    pub description: &'static str,
    pub technology: &'static str,
    pub group_size_of_learners: &'static str,
    pub interaction: &'static str,
}

static METHODS: [(&str, MethodSpecification); 6] = [
    (
        "online_asynchronous",
        MethodSpecification {
            description: "Self-paced online learning with flexible scheduling",
            technology: "LMS, video content, discussion forums",
            group_size_of_learners: "Unlimited with moderation",
            interaction: "Discussion forums, peer feedback, instructor messaging",
        },
    ),
    (
        "online_synchronous",
        MethodSpecification {
            description: "Real-time online sessions with live interaction",
            technology: "Video conferencing, interactive whiteboards, breakout rooms",
            group_size_of_learners: "15-25 participants",
            interaction: "Live Q&A, group exercises, real-time collaboration",
        },
    ),
    (
        "blended",
        MethodSpecification {
            description: "Combination of online and face-to-face learning",
            technology: "LMS integration, mobile apps, collaboration tools",
            group_size_of_learners: "20-30 participants",
            interaction: "Flipped classroom, workshop sessions, online collaboration",
        },
    ),
    (
        "hands_on_intensive",
        MethodSpecification {
            description: "Intensive practical sessions with hands-on application",
            technology: "Lab environments, professional tools, simulation platforms",
            group_size_of_learners: "10-15 participants",
            interaction: "Hands-on practice, peer collaboration, expert guidance",
        },
    ),
    (
        "executive_intensive",
        MethodSpecification {
            description: "High-level intensive format for senior professionals",
            technology: "Executive platforms, case libraries, strategic tools",
            group_size_of_learners: "8-12 executives",
            interaction: "Case discussions, strategic simulations, peer consultation",
        },
    ),
    (
        "structured_program",
        MethodSpecification {
            description: "Comprehensive structured learning with clear progression",
            technology: "Integrated learning platforms, progress tracking, portfolio tools",
            group_size_of_learners: "15-25 participants",
            interaction: "Cohort learning, mentorship, structured assessments",
        },
    ),
];

/// Specification for a named method; unknown names get the asynchronous online one.
pub fn method_specification(name: &str) -> &'static MethodSpecification {
    let lookup = |wanted: &str| {
        METHODS
            .iter()
            .find(|(candidate, _)| *candidate == wanted)
            .map(|(_, spec)| spec)
    };
    match lookup(name) {
        Some(spec) => spec,
        None => &METHODS[0].1,
    }
}

pub fn is_known_method(name: &str) -> bool {
    METHODS.iter().any(|(candidate, _)| *candidate == name)
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PrimaryMethod {
    /// The name as requested, even when the specification fell back.
    pub name: String,
    pub specification: MethodSpecification,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DeliveryFramework {
    pub primary_method: PrimaryMethod,
    pub secondary_methods: Vec<String>,
    pub workplace_component: String,
}

impl DeliveryFramework {
    pub fn from_descriptor(descriptor: &DeliveryDescriptor) -> Self {
        if !is_known_method(&descriptor.primary) {
            tracing::debug!(
                method = %descriptor.primary,
                fallback = FALLBACK_METHOD,
                "unknown delivery method"
            );
        }
        Self {
            primary_method: PrimaryMethod {
                name: descriptor.primary.clone(),
                specification: *method_specification(&descriptor.primary),
            },
            secondary_methods: descriptor.secondary.clone(),
            workplace_component: descriptor.workplace_component.clone(),
        }
    }
}
