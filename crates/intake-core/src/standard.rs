//! The product's onboarding sequence.

use intake_domain::{
    ChoiceQuestion, FieldDescriptor, FieldType, PreviewFeature, PreviewStep, ScreenDescriptor,
    GOALS_KEY,
};

use crate::{catalog::Catalog, error::CatalogError};

/// Builds the standard eleven-screen intake catalog. With `show_preview`
/// unset the terminal screen completes the flow directly.
pub fn standard_catalog(show_preview: bool) -> Result<Catalog, CatalogError> {
    let mut screens = standard_screens();
    if show_preview {
        if let Some(last) = screens.pop() {
            screens.push(last.with_preview(quick_tour()));
        }
        Catalog::new(screens)
    } else {
        Catalog::linear(screens)
    }
}

fn quick_tour() -> PreviewStep {
    PreviewStep::new(
        "Quick Tour",
        vec![
            PreviewFeature::new(
                "Training Programs",
                "Access personalized workout plans tailored to your goals",
            ),
            PreviewFeature::new(
                "Progress Tracking",
                "Monitor your progress with photos and measurements",
            ),
            PreviewFeature::new(
                "Exercise Library",
                "Browse through detailed exercise demonstrations",
            ),
            PreviewFeature::new(
                "Personal Notes",
                "Keep track of your thoughts and achievements",
            ),
        ],
    )
    .with_continue_label("Get Started")
}

fn standard_screens() -> Vec<ScreenDescriptor> {
    vec![
        ScreenDescriptor::informational(
            1,
            "Welcome 🎉💪🔥",
            "Welcome to your personalized fitness journey! Answer a few questions to help us create the perfect program for you.",
        )
        .with_continue_label("Let's Start!"),
        ScreenDescriptor::form(
            2,
            "Personal Information",
            vec![
                FieldDescriptor::new("fullName", "Full Name", FieldType::Text),
                FieldDescriptor::new("dateOfBirth", "Date of Birth", FieldType::Date),
                FieldDescriptor::new("weight", "Current Weight (kg)", FieldType::Number),
                FieldDescriptor::new("height", "Height (cm)", FieldType::Number),
            ],
        ),
        ScreenDescriptor::single_choice(
            3,
            "Your Lifestyle",
            vec![
                ChoiceQuestion::new("Job Type", ["Very demanding", "Moderate", "Sedentary"]),
                ChoiceQuestion::new("Lifestyle", ["Active", "Moderately active", "Sedentary"]),
            ],
        ),
        ScreenDescriptor::informational(
            4,
            "Every Step Counts!",
            "Your lifestyle impacts your progress. Even small changes can make a difference!",
        )
        .with_icon("activity"),
        ScreenDescriptor::form(
            5,
            "Current Training",
            vec![
                FieldDescriptor::new(
                    "trainingExperience",
                    "How long have you been training? (months)",
                    FieldType::Number,
                ),
                FieldDescriptor::new("trainingType", "Type of training (optional)", FieldType::Text),
            ],
        )
        .with_upload(),
        ScreenDescriptor::frequency(
            6,
            "Training Frequency",
            "How many times per week do you want to train?",
            vec![2, 3, 4],
        ),
        ScreenDescriptor::form(
            7,
            "Health & Wellness",
            vec![
                FieldDescriptor::new(
                    "medicalConditions",
                    "Current/past medical conditions",
                    FieldType::LongText,
                )
                .with_placeholder("List any medical conditions that might affect your training"),
                FieldDescriptor::new("medications", "Current medications", FieldType::Text)
                    .with_placeholder("List any medications you're currently taking"),
                FieldDescriptor::new("jointPain", "Any joint pain?", FieldType::Text)
                    .with_placeholder("Describe any joint pain or discomfort"),
                FieldDescriptor::new("surgeries", "Past surgeries", FieldType::Text)
                    .with_placeholder("List any relevant surgeries"),
            ],
        ),
        ScreenDescriptor::form(
            8,
            "Nutrition",
            vec![
                FieldDescriptor::new("diet", "Describe your usual diet", FieldType::LongText)
                    .with_placeholder("Include typical meals and eating patterns"),
                FieldDescriptor::new("supplements", "Current supplements", FieldType::Text)
                    .with_placeholder("List any supplements you take regularly"),
                FieldDescriptor::new("allergies", "Food intolerances/allergies", FieldType::Text)
                    .with_placeholder("List any food allergies or intolerances"),
            ],
        )
        .with_icon("apple"),
        ScreenDescriptor::single_choice(
            9,
            "Lifestyle Details",
            vec![
                ChoiceQuestion::new(
                    "Alcohol consumption",
                    ["Never", "Once a week", "More than 3 times a week"],
                ),
                ChoiceQuestion::new("Menstrual cycle", ["Regular", "Irregular", "Not applicable"]),
            ],
        )
        .with_icon("wine"),
        ScreenDescriptor::multi_select(
            10,
            "Your Goals",
            GOALS_KEY,
            "What are your main goals? (Select all that apply)",
            [
                "Weight loss",
                "Muscle gain",
                "Performance improvement",
                "General well-being",
                "Flexibility",
                "Stress reduction",
                "Better sleep",
                "Other",
            ],
        ),
        ScreenDescriptor::terminal(
            11,
            "Awesome! 🎉",
            "We have everything we need to create your personalized plan. Get ready to give it your all!",
        )
        .with_continue_label("Explore the app")
        .with_icon("trophy"),
    ]
}
