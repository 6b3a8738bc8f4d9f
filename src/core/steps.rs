use crate::core::state::AnswerKey;

pub const STEP_COUNT: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepDefinition {
    pub id: usize,
    pub title: &'static str,
    pub question: &'static str,
    pub description: &'static str,
    pub checklist: &'static [&'static str],
    pub dropdown: Option<&'static [&'static str]>,
    pub placeholder: &'static str,
    pub key: AnswerKey,
}

/// Looks up a step by its 1-based position.
pub fn step(position: usize) -> Option<&'static StepDefinition> {
    position.checked_sub(1).and_then(|i| STEPS.get(i))
}

pub static STEPS: [StepDefinition; STEP_COUNT] = [
    StepDefinition {
        id: 1,
        title: "Role",
        question: "What is the role?",
        description: "Define the specific expertise, profession, or persona. This establishes the knowledge base and perspective for responses.",
        checklist: &[
            "What subject matter expertise is needed?",
            "What professional background would be most helpful?",
            "What credentials or qualifications should be implied?",
            "What industry knowledge is required?",
            "What level of authority should the role have?",
        ],
        dropdown: Some(&[
            "Medical Educator",
            "Financial Advisor",
            "Compliance Officer",
            "Data Analyst",
            "Creative Writing Coach",
            "Technical Writer",
            "Legal Consultant",
            "HR Specialist",
            "Marketing Strategist",
            "Project Manager",
            "Academic Researcher",
            "Customer Service Representative",
            "Training Coordinator",
            "Business Analyst",
            "Quality Assurance Specialist",
            "Content Creator",
            "Sales Coach",
            "Operations Manager",
            "IT Support Specialist",
            "Healthcare Administrator",
        ]),
        placeholder: "Select from dropdown or type your own role",
        key: AnswerKey::Role,
    },
    StepDefinition {
        id: 2,
        title: "Goal",
        question: "What is the main task or outcome you want to achieve?",
        description: "Clearly state the primary objective. Be specific about what success looks like.",
        checklist: &[
            "What is the specific end result you want?",
            "What problem needs to be solved?",
            "What information needs to be communicated?",
            "What action should the user take after?",
            "How will you measure success?",
        ],
        dropdown: None,
        placeholder: "e.g., explain complex medical procedures in simple terms, teach budgeting basics to newcomers, review documents for regulatory compliance",
        key: AnswerKey::Goal,
    },
    StepDefinition {
        id: 3,
        title: "Context",
        question: "What is the sector and situational background?",
        description: "Provide the industry, environment, or setting where this will be used.",
        checklist: &[
            "What industry or sector is this for?",
            "What is the organizational setting?",
            "What external factors influence this situation?",
            "What time constraints or urgency exists?",
            "What resources are available or limited?",
        ],
        dropdown: Some(&[
            "Healthcare & Medical",
            "Education & Training",
            "Financial Services",
            "Technology & Software",
            "Legal & Compliance",
            "Human Resources",
            "Marketing & Advertising",
            "Manufacturing & Operations",
            "Retail & E-commerce",
            "Government & Public Sector",
            "Non-profit & Social Services",
            "Real Estate",
            "Consulting Services",
            "Media & Entertainment",
            "Transportation & Logistics",
            "Energy & Utilities",
            "Agriculture & Food",
            "Construction & Engineering",
            "Hospitality & Tourism",
            "Research & Development",
        ]),
        placeholder: "Select from dropdown or describe your sector/context",
        key: AnswerKey::Context,
    },
    StepDefinition {
        id: 4,
        title: "Audience",
        question: "Who is the target audience and what are their constraints?",
        description: "Specify audience characteristics that affect communication style and content.",
        checklist: &[
            "What is their age group and education level?",
            "What is their technical expertise?",
            "What cultural considerations apply?",
            "What language or accessibility needs exist?",
            "What prior knowledge can you assume?",
        ],
        dropdown: Some(&[
            "Children (ages 5-12)",
            "Teenagers (ages 13-18)",
            "College students",
            "Young professionals (20s-30s)",
            "Mid-career professionals (30s-50s)",
            "Senior executives",
            "Retirees/elderly",
            "Low health literacy adults",
            "Non-native English speakers",
            "Technical professionals",
            "General public",
            "Industry specialists",
            "Beginner learners",
            "Intermediate learners",
            "Advanced practitioners",
            "People with disabilities",
            "Low-income communities",
            "Rural populations",
            "Urban professionals",
            "Remote workers",
        ]),
        placeholder: "Select from dropdown or describe your audience",
        key: AnswerKey::Audience,
    },
    StepDefinition {
        id: 5,
        title: "Constraints & Ethics",
        question: "What ethical guardrails, limitations, or exclusions must apply?",
        description: "Define boundaries, restrictions, and ethical considerations that must be followed.",
        checklist: &[
            "What should absolutely NOT be done?",
            "What legal or regulatory requirements apply?",
            "What professional standards must be maintained?",
            "What safety considerations are important?",
            "What biases or sensitive topics need special care?",
        ],
        dropdown: None,
        placeholder: "e.g., no medical diagnoses, maintain political neutrality, respect cultural sensitivity, avoid financial advice, cite sources when needed",
        key: AnswerKey::Constraints,
    },
    StepDefinition {
        id: 6,
        title: "Style & Format",
        question: "What tone, format, and communication style should be used?",
        description: "Specify how information should be presented and structured.",
        checklist: &[
            "What tone is appropriate (formal, casual, empathetic)?",
            "What format works best (paragraphs, bullets, steps)?",
            "What reading level should be used?",
            "How long should responses typically be?",
            "What special formatting or structure is needed?",
        ],
        dropdown: Some(&[
            "Formal and professional",
            "Conversational and friendly",
            "Empathetic and supportive",
            "Direct and concise",
            "Academic and scholarly",
            "Simple and clear",
            "Technical and precise",
            "Creative and engaging",
            "Authoritative and confident",
            "Patient and instructional",
            "Bullet points and lists",
            "Step-by-step instructions",
            "Q&A format",
            "Narrative storytelling",
            "Case study examples",
            "Plain language (8th grade level)",
            "Professional language (college level)",
            "Technical language (expert level)",
            "Multilingual support needed",
            "Visual aids recommended",
        ]),
        placeholder: "Select from dropdown or describe your preferred style",
        key: AnswerKey::Style,
    },
];
