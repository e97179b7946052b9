//! Intent Classification using ordered regex pattern sets.
//!
//! Every intent belongs to a priority tier. The classifier walks the intents
//! in tier order (and table order within a tier) and the first intent with
//! any matching pattern wins. There is no scoring: short conversational
//! intents always shadow broader keyword intents further down the list.
//!
//! Greeting-like patterns are anchored to the start of the message; keyword
//! patterns are not, so a topic word anywhere in the message is enough.

use crate::error::AppError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;
use tracing::debug;

/// Priority tier of an intent, highest priority first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentTier {
    /// Greetings, farewells, thanks, identity and name capture
    Conversational,
    /// Clarifications and follow-up requests
    CrossQuestioning,
    /// General knowledge, problem solving, learning and creativity
    GeneralKnowledge,
    /// Pet care topics
    Veterinary,
    /// School subjects
    Education,
    /// Links between subjects
    CrossSubject,
    /// Study skills and learning meta-topics
    LearningEnhancement,
}

impl IntentTier {
    /// All tiers in priority order.
    pub const ALL: [IntentTier; 7] = [
        IntentTier::Conversational,
        IntentTier::CrossQuestioning,
        IntentTier::GeneralKnowledge,
        IntentTier::Veterinary,
        IntentTier::Education,
        IntentTier::CrossSubject,
        IntentTier::LearningEnhancement,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            IntentTier::Conversational => "conversational",
            IntentTier::CrossQuestioning => "cross_questioning",
            IntentTier::GeneralKnowledge => "general_knowledge",
            IntentTier::Veterinary => "veterinary",
            IntentTier::Education => "education",
            IntentTier::CrossSubject => "cross_subject",
            IntentTier::LearningEnhancement => "learning_enhancement",
        }
    }
}

impl fmt::Display for IntentTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// An intent and the patterns that recognize it. Any pattern is sufficient.
#[derive(Debug, Clone)]
pub struct IntentDefinition {
    pub name: String,
    pub tier: IntentTier,
    pub patterns: Vec<Regex>,
}

impl IntentDefinition {
    /// Compiles a definition from pattern sources.
    pub fn compile(name: &str, tier: IntentTier, patterns: &[&str]) -> Result<Self, AppError> {
        let patterns = patterns
            .iter()
            .map(|p| Regex::new(p))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            name: name.to_string(),
            tier,
            patterns,
        })
    }

    fn first_match(&self, text: &str) -> Option<&Regex> {
        self.patterns.iter().find(|p| p.is_match(text))
    }
}

/// Outcome of classifying one message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Matched intent name, `None` when nothing matched
    pub intent: Option<String>,
    /// Tier of the matched intent
    pub tier: Option<IntentTier>,
    /// Source of the pattern that matched
    pub matched_pattern: Option<String>,
    /// Captured substrings for intents that fill a template
    pub extracted_groups: Option<Vec<String>>,
}

impl ClassificationResult {
    pub fn no_match() -> Self {
        Self::default()
    }

    pub fn is_match(&self) -> bool {
        self.intent.is_some()
    }
}

/// Lower-cases and trims. Punctuation is kept.
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Built-in intents in priority order: (name, tier, patterns).
const INTENT_TABLE: &[(&str, IntentTier, &[&str])] = &[
    // Conversational basics
    ("greeting", IntentTier::Conversational, &[
        r"^(hi|hello|hey|hiya|howdy|greetings|yo|sup)\b",
        r"^good (morning|afternoon|evening|day)\b",
    ]),
    ("introduction", IntentTier::Conversational, &[
        r"\b(introduce yourself|tell me about yourself|who am i talking to|who am i speaking with)\b",
    ]),
    ("farewell", IntentTier::Conversational, &[
        r"^(bye|goodbye|good bye|farewell|cya|ciao)\b",
        r"^(see you|see ya|good night|take care|gotta go|talk to you later)\b",
    ]),
    ("thanks", IntentTier::Conversational, &[
        r"\b(thank you|thanks|thx|much appreciated|appreciate it)\b",
    ]),
    ("how_are_you", IntentTier::Conversational, &[
        r"\bhow are (you|u)\b",
        r"\b(how's it going|how is it going|how do you do|how have you been|how are things)\b",
    ]),
    ("capabilities", IntentTier::Conversational, &[
        r"\b(what can you do|what do you know|how can you help|what can you help|your capabilities|what are you capable of|what are your features)\b",
    ]),
    ("identity", IntentTier::Conversational, &[
        r"\b(who are you|what are you|who made you|who created you|who built you|what is your name|what's your name)\b",
        r"\bare you (a |an )?(bot|robot|ai|human|real person|machine)\b",
    ]),
    ("casual_chat", IntentTier::Conversational, &[
        r"\b(tell me a joke|jokes?|something funny|make me laugh)\b",
        r"\b(i'm bored|i am bored|let's chat|let's talk|chat with me|just chatting|what's up|wassup)\b",
    ]),
    ("user_name", IntentTier::Conversational, &[
        r"\bmy name is\b",
        r"\bmy name's\b",
        r"^(please |just )?call me\b",
        r"^(i am|i'm) called\b",
    ]),
    // Cross-questioning and follow-ups
    ("clarification", IntentTier::CrossQuestioning, &[
        r"\b(what do you mean|what does that mean|i don't understand|i do not understand|i don't get it|can you clarify|please clarify|clarify that)\b",
        r"\b(i'm confused|i am confused|say that again|explain that again|rephrase that)\b",
    ]),
    ("deep_dive", IntentTier::CrossQuestioning, &[
        r"\b(tell me more|more details?|go deeper|dig deeper|in more depth|in-depth|in depth|elaborate|expand on)\b",
    ]),
    ("multi_question", IntentTier::CrossQuestioning, &[
        r"\?.*\?",
        r"\b(several questions|multiple questions|a few questions|two questions|another question)\b",
    ]),
    // General knowledge, problem solving, learning and creativity
    ("general_knowledge", IntentTier::GeneralKnowledge, &[
        r"\b(fun fact|random fact|interesting fact|trivia|did you know|general knowledge|tell me something interesting)\b",
    ]),
    ("problem_solving", IntentTier::GeneralKnowledge, &[
        r"\b(problem[- ]solving|solve (a|this|my) problem|help me solve|how do i fix|i'm stuck|i am stuck|troubleshoot\w*)\b",
    ]),
    ("learning_support", IntentTier::GeneralKnowledge, &[
        r"\b(help me (learn|understand)|i want to learn|teach me|explain (this|something) to me|i need help (learning|understanding))\b",
    ]),
    ("creativity", IntentTier::GeneralKnowledge, &[
        r"\b(creative|creativity|brainstorm\w*|write a (poem|story|song)|story ideas?|imagine|invent\w*)\b",
    ]),
    // Veterinary topics, most specific first
    ("pet_emergency", IntentTier::Veterinary, &[
        r"\b(emergency|poison(ed|ing|ous)?|toxic|bleeding|seizures?|not breathing|can't breathe|hit by a car|ate chocolate|swallowed)\b",
    ]),
    ("vaccination", IntentTier::Veterinary, &[
        r"\b(vaccin\w*|rabies|distemper|parvo\w*|booster shots?)\b",
    ]),
    ("parasite_control", IntentTier::Veterinary, &[
        r"\b(fleas?|ticks?|heartworms?|worms|deworm\w*|parasites?|mites?)\b",
    ]),
    ("dental_care", IntentTier::Veterinary, &[
        r"\b(dental|teeth cleaning|tooth brushing|bad breath|plaque|tartar)\b",
    ]),
    ("pet_nutrition", IntentTier::Veterinary, &[
        r"\b(dog|cat|pet|puppy|kitten) (food|diet|nutrition|treats)\b",
        r"\bfeed(ing)? my (dog|cat|pet|puppy|kitten)\b",
        r"\bwhat (should|can) my (dog|cat|pet) eat\b",
    ]),
    ("pet_behavior", IntentTier::Veterinary, &[
        r"\b(barking|biting|chewing furniture|scratching furniture|separation anxiety|litter box|house ?training|potty training|leash training|aggressive (dog|cat))\b",
        r"\b(pet|dog|cat) behaviou?r\b",
    ]),
    ("grooming", IntentTier::Veterinary, &[
        r"\b(groom\w*|nail trim\w*|trim(ming)? nails|shedding|matted fur)\b",
        r"\bbath(e|ing)? my (dog|cat|pet|puppy)\b",
    ]),
    ("spay_neuter", IntentTier::Veterinary, &[
        r"\b(spay\w*|neuter\w*|castrat\w*|desex\w*)\b",
    ]),
    ("senior_pets", IntentTier::Veterinary, &[
        r"\b(senior|old|older|elderly|aging|ageing) (dog|cat|pet)s?\b",
    ]),
    ("exotic_pets", IntentTier::Veterinary, &[
        r"\b(rabbits?|bunny|bunnies|hamsters?|guinea pigs?|parrots?|birds?|reptiles?|lizards?|snakes?|turtles?|tortoises?|ferrets?|exotic pets?)\b",
    ]),
    ("dog_care", IntentTier::Veterinary, &[
        r"\b(dog|dogs|puppy|puppies|canine)\b",
    ]),
    ("cat_care", IntentTier::Veterinary, &[
        r"\b(cat|cats|kitten|kittens|feline)\b",
    ]),
    ("pet_health", IntentTier::Veterinary, &[
        r"\b(vet|vets|veterinar\w*|pet health|animal health|my pet|pets?|sick animal)\b",
    ]),
    // School subjects
    ("mathematics_education", IntentTier::Education, &[
        r"\b(math|maths|mathematics|algebra|geometry|calculus|trigonometry|arithmetic|equations?|fractions?|statistics|probability)\b",
    ]),
    ("science_education", IntentTier::Education, &[
        r"\b(science|physics|chemistry|biology|photosynthesis|atoms?|molecules?|gravity|ecosystems?|evolution|astronomy|cells?)\b",
    ]),
    ("history_education", IntentTier::Education, &[
        r"\b(history|historical|ancient|world war|civili[sz]ations?|revolution|empires?|medieval)\b",
    ]),
    ("language_arts", IntentTier::Education, &[
        r"\b(language arts|grammar|essays?|literature|poetry|poems?|writing skills|reading comprehension|vocabulary|spelling|punctuation|novels?)\b",
    ]),
    ("computer_science_education", IntentTier::Education, &[
        r"\b(programming|coding|code|computer science|algorithms?|python|javascript|software|data structures?)\b",
    ]),
    ("geography_education", IntentTier::Education, &[
        r"\b(geography|continents?|countries|capital cities|capital of|oceans?|mountains?|rivers?|map reading)\b",
    ]),
    ("art_education", IntentTier::Education, &[
        r"\b(art|arts|drawing|painting|sculpture|sketching|color theory)\b",
    ]),
    ("music_education", IntentTier::Education, &[
        r"\b(music|musical|instruments?|piano|guitar|violin|rhythm|melody|harmony|music theory)\b",
    ]),
    ("physical_education", IntentTier::Education, &[
        r"\b(physical education|exercise|fitness|sports?|workouts?|stretching|gym class)\b",
    ]),
    ("economics_education", IntentTier::Education, &[
        r"\b(economics|economy|supply and demand|inflation|markets?|budget\w*|finance)\b",
    ]),
    ("foreign_languages", IntentTier::Education, &[
        r"\b(spanish|french|german|italian|chinese|mandarin|japanese|foreign languages?|second language|learn a (new )?language)\b",
    ]),
    ("philosophy_education", IntentTier::Education, &[
        r"\b(philosophy|philosophers?|ethics|socrates|plato|aristotle|existential\w*|meaning of life)\b",
    ]),
    // Cross-subject connections
    ("cross_subject_connections", IntentTier::CrossSubject, &[
        r"\b(interdisciplinary|cross[- ]subject|connections? between subjects|subjects (connect|relate)|how (are|do) subjects)\b",
    ]),
    ("stem_integration", IntentTier::CrossSubject, &[
        r"\b(stem|steam)\b",
    ]),
    ("humanities_integration", IntentTier::CrossSubject, &[
        r"\bhumanities\b",
    ]),
    ("real_world_applications", IntentTier::CrossSubject, &[
        r"\b(real[- ]world|real life|everyday life|when will i (ever )?use|why do i need to learn)\b",
    ]),
    ("project_based_learning", IntentTier::CrossSubject, &[
        r"\b(project[- ]based|hands[- ]on|school projects?|class projects?)\b",
    ]),
    ("global_perspectives", IntentTier::CrossSubject, &[
        r"\b(climate change|sustainab\w*|global (issues|perspectives?|citizenship)|environmental issues)\b",
    ]),
    // Learning enhancement
    ("study_tips", IntentTier::LearningEnhancement, &[
        r"\b(study tips|how to study|how should i study|study better|study habits|studying)\b",
    ]),
    ("memory_techniques", IntentTier::LearningEnhancement, &[
        r"\b(memori[sz]e|memori[sz]ing|memory techniques?|remember (things|better|facts)|mnemonics?|spaced repetition)\b",
    ]),
    ("exam_preparation", IntentTier::LearningEnhancement, &[
        r"\b(exams?|test prep\w*|finals|prepare for (a|my|the) (test|exam|quiz)|quiz(zes)?)\b",
    ]),
    ("time_management", IntentTier::LearningEnhancement, &[
        r"\b(time management|manage my time|procrastinat\w*|schedule|deadlines?|pomodoro)\b",
    ]),
    ("motivation", IntentTier::LearningEnhancement, &[
        r"\b(motivat\w*|unmotivated|inspire me|give up|can't focus|cannot focus)\b",
    ]),
    ("critical_thinking", IntentTier::LearningEnhancement, &[
        r"\b(critical thinking|think critically|evaluate (sources|arguments)|logical fallac\w*|reasoning skills)\b",
    ]),
    ("note_taking", IntentTier::LearningEnhancement, &[
        r"\b(notes|note[- ]taking|cornell method|mind maps?|outlining)\b",
    ]),
    ("learning_styles", IntentTier::LearningEnhancement, &[
        r"\b(learning styles?|visual learner|auditory learner|kinesthetic)\b",
    ]),
    ("growth_mindset", IntentTier::LearningEnhancement, &[
        r"\b(growth mindset|fixed mindset|i'm not smart|i am not smart|i'm bad at|i am bad at)\b",
    ]),
    ("research_skills", IntentTier::LearningEnhancement, &[
        r"\b(research skills|how to research|find sources|cite sources|citations?|bibliography)\b",
    ]),
];

// Compile patterns once at startup
// NOTE: expect() is acceptable here: the table is a compile-time constant
static BUILTIN_INTENTS: LazyLock<Vec<IntentDefinition>> = LazyLock::new(|| {
    INTENT_TABLE
        .iter()
        .map(|(name, tier, patterns)| {
            IntentDefinition::compile(name, *tier, patterns)
                .unwrap_or_else(|e| panic!("Invalid regex in intent '{}': {}", name, e))
        })
        .collect()
});

/// First-match intent classifier.
#[derive(Debug, Clone)]
pub struct IntentClassifier {
    /// Tier-major, table order within a tier
    definitions: Vec<IntentDefinition>,
}

impl Default for IntentClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl IntentClassifier {
    /// Create a new intent classifier with the built-in intents
    pub fn new() -> Self {
        Self {
            definitions: BUILTIN_INTENTS.clone(),
        }
    }

    /// Builds a classifier from custom definitions.
    ///
    /// Definitions are stable-sorted by tier, so the relative order of
    /// intents sharing a tier is kept.
    pub fn from_definitions(mut definitions: Vec<IntentDefinition>) -> Self {
        definitions.sort_by_key(|d| d.tier);
        Self { definitions }
    }

    /// Intent names with their tiers, in the order they are tried.
    pub fn priority_order(&self) -> Vec<(&str, IntentTier)> {
        self.definitions
            .iter()
            .map(|d| (d.name.as_str(), d.tier))
            .collect()
    }

    /// Classify the intent of a text
    pub fn classify(&self, text: &str) -> ClassificationResult {
        let normalized = normalize(text);

        if normalized.is_empty() {
            return ClassificationResult::no_match();
        }

        for definition in &self.definitions {
            if let Some(pattern) = definition.first_match(&normalized) {
                debug!(
                    intent = %definition.name,
                    tier = %definition.tier,
                    pattern = pattern.as_str(),
                    "Intent matched"
                );
                return ClassificationResult {
                    intent: Some(definition.name.clone()),
                    tier: Some(definition.tier),
                    matched_pattern: Some(pattern.as_str().to_string()),
                    extracted_groups: None,
                };
            }
        }

        debug!("No intent matched");
        ClassificationResult::no_match()
    }
}
