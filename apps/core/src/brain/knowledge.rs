//! Knowledge Base: canned response text keyed by topic.
//!
//! Keys are lower-cased on both write and read. The store is read-many,
//! write-rare, so it sits behind an `RwLock` and is shared through an `Arc`
//! by whoever owns the responder.

use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// A single topic entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeEntry {
    /// Topic key, matched case-insensitively
    pub key: String,
    /// Response body returned verbatim
    pub text: String,
}

/// In-memory topic store.
#[derive(Debug, Default)]
pub struct KnowledgeBase {
    entries: RwLock<HashMap<String, String>>,
}

impl KnowledgeBase {
    /// Creates a store pre-populated with the built-in topics.
    pub fn new() -> Self {
        let entries = BUILTIN_KNOWLEDGE
            .iter()
            .map(|(key, text)| (normalize_key(key), (*text).to_string()))
            .collect();
        Self {
            entries: RwLock::new(entries),
        }
    }

    /// Creates a store with no entries at all.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Case-insensitive lookup. Callers supply their own fallback on `None`.
    pub fn get(&self, key: &str) -> Option<String> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.get(&normalize_key(key)).cloned()
    }

    /// Inserts or overwrites the entry for `key`.
    pub fn put(&self, key: &str, text: &str) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.insert(normalize_key(key), text.to_string());
    }

    pub fn contains(&self, key: &str) -> bool {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.contains_key(&normalize_key(key))
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Merges a JSON array of `{"key", "text"}` entries, overwriting by key.
    ///
    /// Nothing is inserted unless the whole document parses. Returns the
    /// number of entries read.
    pub fn load_json(&self, json: &str) -> Result<usize, AppError> {
        let loaded: Vec<KnowledgeEntry> = serde_json::from_str(json)?;
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        for entry in &loaded {
            entries.insert(normalize_key(&entry.key), entry.text.clone());
        }
        Ok(loaded.len())
    }
}

fn normalize_key(key: &str) -> String {
    key.to_lowercase()
}

/// Built-in topics, keyed by the intent that replies with them.
const BUILTIN_KNOWLEDGE: &[(&str, &str)] = &[
    // Conversational basics
    ("greeting", "Hello there! 🍀 I'm LuckyChat, your friendly assistant. I can help with pet care questions, school subjects and study techniques. What would you like to talk about today?"),
    ("introduction", "Let me introduce myself! I'm LuckyChat 🍀, a rule-based assistant. I know a good deal about veterinary topics like vaccinations, nutrition and pet behavior, and about school subjects from algebra to world history. I can also share study tips, memory techniques and exam strategies."),
    ("farewell", "Goodbye! 👋 It was lovely chatting with you. Come back any time you have a question about your pets, your studies or anything else. Good luck! 🍀"),
    ("thanks", "You're very welcome! 😊 I'm glad I could help. Is there anything else you'd like to know?"),
    ("how_are_you", "I'm doing great, thanks for asking! 🍀 I'm always ready for a good conversation. How are you doing today?"),
    ("capabilities", "Here's what I can help with:\n• Pet care: health, vaccinations, nutrition, behavior, grooming and emergencies\n• School subjects: math, science, history, language arts, computer science, geography, art, music and more\n• Connections between subjects and real-world applications\n• Learning skills: study tips, memory techniques, exam preparation and time management\nJust ask!"),
    ("identity", "I'm LuckyChat 🍀, a friendly chat assistant. I'm not a human and I don't learn from our conversations; I match your message to topics I know about and answer from my knowledge base."),
    ("casual_chat", "I love a good chat! 😄 Here's one for you: why did the student eat his homework? Because the teacher said it was a piece of cake! Want to hear a fun fact, or shall we dive into a topic?"),
    ("user_name", "It's nice to meet you! 🍀 I didn't quite catch your name, though. You can tell me by saying \"My name is\" followed by your name."),
    // Cross-questioning and follow-ups
    ("clarification", "Sorry if I wasn't clear! Let me try again: could you tell me which part was confusing? If you rephrase your question or name the specific topic, I'll give you a more focused answer."),
    ("deep_dive", "Happy to go deeper! 🔍 To give you more detail, tell me which topic you'd like to expand on, for example \"tell me more about photosynthesis\" or \"more details on puppy vaccinations\"."),
    ("multi_question", "Looks like you have several questions! 📝 Let's take them one at a time so each gets a proper answer. Which one would you like to start with?"),
    // General knowledge, problem solving, learning and creativity
    ("general_knowledge", "Here's a fun fact: honey never spoils! Archaeologists have found pots of honey in ancient Egyptian tombs that are over 3,000 years old and still perfectly edible. 🍯 Ask me about science, history or animals for more."),
    ("problem_solving", "Let's tackle it step by step:\n1. Define the problem clearly.\n2. Break it into smaller parts.\n3. Brainstorm possible solutions.\n4. Pick the most promising one and try it.\n5. Review the result and adjust.\nTell me more about the problem and we'll work through it together."),
    ("learning_support", "I'd love to help you learn! 📚 Start by telling me the subject and what you already know. We'll build from there with clear explanations, examples and a few practice questions."),
    ("creativity", "Let's get creative! 🎨 Try this warm-up: pick three random objects around you and invent a story that connects them. Brainstorming without judging your ideas first is the best way to let creativity flow."),
    // Veterinary topics
    ("pet_emergency", "⚠️ If your pet is in immediate danger (poisoning, heavy bleeding, seizures, difficulty breathing or trauma), contact your veterinarian or an emergency animal clinic right away. Keep your pet calm and warm, don't induce vomiting unless a vet tells you to, and bring any packaging of what they swallowed."),
    ("vaccination", "Vaccinations protect pets from serious diseases. 💉 Puppies usually receive core vaccines (distemper, parvovirus, adenovirus, rabies) starting at 6-8 weeks with boosters every 3-4 weeks until about 16 weeks. Kittens get FVRCP and rabies on a similar schedule. Adult pets need boosters every 1-3 years; your vet will tailor the schedule to your pet's lifestyle."),
    ("parasite_control", "Parasite prevention is essential year-round. 🐜 Use vet-recommended flea and tick preventives monthly, give heartworm prevention to dogs (and cats in high-risk areas), and deworm puppies and kittens every 2 weeks until 12 weeks old, then as your vet advises."),
    ("dental_care", "Dental health matters for pets too! 🦷 Brush your pet's teeth several times a week with pet-safe toothpaste, offer dental chews, and schedule yearly dental check-ups. Bad breath, red gums or difficulty eating can signal dental disease."),
    ("pet_nutrition", "Good nutrition keeps pets healthy. 🥩 Choose a complete and balanced food suited to your pet's species, age and activity level, measure portions to avoid obesity, keep fresh water available, and limit treats to about 10% of daily calories. Never feed chocolate, grapes, onions or xylitol."),
    ("pet_behavior", "Most behavior problems have a cause: boredom, anxiety, lack of training or a medical issue. 🐾 Use positive reinforcement, provide daily exercise and mental stimulation, and keep routines consistent. For sudden changes in behavior, check with your vet first."),
    ("grooming", "Regular grooming keeps coats healthy. ✂️ Brush according to coat type (daily for long-haired pets), trim nails every 3-4 weeks, clean ears gently, and bathe only when needed with pet shampoo. Grooming sessions are also a great time to check for lumps or parasites."),
    ("spay_neuter", "Spaying and neutering prevent unwanted litters and can reduce the risk of certain cancers and behavior problems. Most pets are spayed or neutered around 6 months of age, though your vet may recommend a different timing depending on breed and size."),
    ("senior_pets", "Senior pets (usually 7+ years) benefit from twice-yearly vet check-ups, diets suited to their age, gentle regular exercise and comfortable bedding. 🐕 Watch for changes in appetite, weight, mobility or thirst; they can be early signs of age-related conditions."),
    ("exotic_pets", "Exotic pets like rabbits, birds, reptiles and small mammals have very specific needs. 🦎 Research proper habitat, temperature, lighting and diet for the species, and find a veterinarian experienced with exotic animals for regular check-ups."),
    ("dog_care", "Caring for a dog 🐶 means daily exercise, a balanced diet, regular vet visits, vaccinations, parasite prevention, training with positive reinforcement, and plenty of love and attention. Socialize puppies early with people, animals and new places."),
    ("cat_care", "Cats 🐱 thrive with a clean litter box, fresh water, a high-quality diet, scratching posts, play sessions and regular vet check-ups. Keep them indoors or supervised outside to protect them from traffic and disease."),
    ("pet_health", "A healthy pet needs regular veterinary check-ups, up-to-date vaccinations, parasite prevention, good nutrition and exercise. 🩺 Signs that warrant a vet visit include lethargy, loss of appetite, vomiting, diarrhea, coughing or unusual behavior."),
    // Educational subjects
    ("mathematics_education", "Mathematics is the language of patterns and logic! 📐 Algebra uses symbols to represent unknown values (solve 2x + 3 = 7 and you get x = 2), geometry studies shapes and space, and calculus explores change. Practice regularly, show your work, and check answers by plugging them back in."),
    ("science_education", "Science helps us understand how the world works! 🔬 Physics studies matter, energy and forces; chemistry explores substances and reactions; biology is the study of living things. Every branch follows the scientific method: observe, ask a question, form a hypothesis, experiment and draw conclusions."),
    ("history_education", "History helps us understand how the past shapes the present. 🏛️ Try organizing events on a timeline, look for causes and consequences, and compare primary sources (written at the time) with secondary sources (written later). Asking \"why did this happen?\" turns dates into stories."),
    ("language_arts", "Language arts builds reading, writing, speaking and listening skills. ✍️ Read widely, keep a vocabulary journal, and for essays follow a clear structure: introduction with a thesis, body paragraphs with evidence, and a conclusion that ties it together."),
    ("computer_science_education", "Computer science is about solving problems with computation. 💻 Start with the basics: variables, conditionals, loops and functions. Then explore algorithms and data structures. Python is a great first language because its syntax is clean and readable."),
    ("geography_education", "Geography explores places, people and environments. 🌍 There are 7 continents and 5 oceans; physical geography looks at landforms and climate, while human geography studies populations, cultures and cities. Practice with maps to build your spatial sense."),
    ("art_education", "Art is a way to express ideas and emotions. 🎨 Learn the elements of art (line, shape, color, value, texture, space and form), experiment with different media, and study artists you admire. Sketch a little every day to build your skills."),
    ("music_education", "Music combines rhythm, melody and harmony. 🎵 Learning to read notation, practicing scales and listening actively to different genres will build your musicianship. Short, focused daily practice beats one long session a week."),
    ("physical_education", "Physical education builds fitness, coordination and teamwork. 🏃 Aim for at least 60 minutes of activity a day for young people, warm up before exercise, stretch afterwards, stay hydrated, and mix cardio, strength and flexibility work."),
    ("economics_education", "Economics studies how people make choices with limited resources. 💰 Key ideas include supply and demand, opportunity cost, inflation and markets. A great way to start is by creating a personal budget and tracking where your money goes."),
    ("foreign_languages", "Learning a new language opens doors! 🗣️ Practice a little every day, learn the most common words first, listen to native speakers through music and shows, and don't be afraid to make mistakes when speaking."),
    ("philosophy_education", "Philosophy asks big questions about knowledge, reality, ethics and meaning. 🤔 Start with thinkers like Socrates, Plato and Aristotle, practice building and critiquing arguments, and remember that asking good questions matters more than having quick answers."),
    // Cross-subject connections
    ("cross_subject_connections", "Subjects are deeply connected! 🔗 Math powers science and music, history gives context to literature, and geography shapes economics. Looking for these links helps you remember more and see the bigger picture."),
    ("stem_integration", "STEM brings science, technology, engineering and math together. 🚀 Building a simple bridge, coding a game or running a science experiment lets you use all four at once, which is exactly how real-world problems get solved."),
    ("humanities_integration", "The humanities (history, literature, philosophy, art and languages) all explore the human experience. 📖 Reading a novel alongside the history of its era, or studying the art of a civilization, gives each subject deeper meaning."),
    ("real_world_applications", "You'll use what you learn more than you think! 🌟 Percentages help with shopping and budgeting, science explains cooking and health, writing skills matter in every job, and history helps you understand the news."),
    ("project_based_learning", "Project-based learning means learning by doing. 🛠️ Pick a real question, plan your project, research, build or create something, and present what you learned. It develops collaboration, problem solving and creativity all at once."),
    ("global_perspectives", "Global issues like climate change and sustainability connect science, economics, geography and ethics. 🌱 Studying them from several angles helps you understand different viewpoints and think about solutions."),
    // Learning enhancement
    ("study_tips", "Here are some proven study tips: 📚\n• Study in short focused sessions (25-50 minutes) with breaks\n• Test yourself instead of just re-reading\n• Teach the material to someone else\n• Find a quiet space without distractions\n• Get enough sleep: your brain consolidates memories overnight"),
    ("memory_techniques", "Try these memory techniques: 🧠\n• Mnemonics and acronyms (e.g. ROYGBIV for rainbow colors)\n• Spaced repetition: review material at increasing intervals\n• The memory palace: link facts to places in a familiar building\n• Chunking: group information into small meaningful units"),
    ("exam_preparation", "To prepare for exams: 📝\n1. Start reviewing at least a week ahead\n2. Make a study schedule by topic\n3. Practice with past papers under timed conditions\n4. Focus on weak areas\n5. Sleep well and eat a good breakfast on exam day"),
    ("time_management", "Good time management reduces stress! ⏰ Try the Pomodoro technique (25 minutes of work, 5 minutes of rest), list tasks by priority, break big assignments into small steps with their own deadlines, and beat procrastination by starting with just five minutes."),
    ("motivation", "Everyone loses motivation sometimes, and that's okay! 💪 Set small, achievable goals, celebrate progress, remind yourself why the goal matters to you, and study with friends for accountability. Progress, not perfection!"),
    ("critical_thinking", "Critical thinking means evaluating information carefully. 🧐 Ask: What's the evidence? Who is the source and what might their bias be? Are there other explanations? Does the conclusion really follow from the facts?"),
    ("note_taking", "Effective note-taking methods: ✏️\n• Cornell method: split the page into notes, cues and a summary\n• Mind maps: connect ideas visually around a central topic\n• Outlining: organize points with headings and sub-points\nReview your notes within 24 hours to lock in what you learned."),
    ("learning_styles", "People often talk about visual, auditory, reading/writing and kinesthetic learning styles. 🎧 Research shows mixing methods works best: combine diagrams, explanations out loud, written summaries and hands-on practice for any subject."),
    ("growth_mindset", "Having a growth mindset means believing abilities can be developed through effort and practice. 🌱 Mistakes are part of learning! Instead of \"I'm not good at this\", try \"I'm not good at this yet\"."),
    ("research_skills", "Strong research skills start with a clear question. 🔎 Use reliable sources (academic databases, libraries, reputable organizations), compare several sources, take notes with references, and always cite where your information comes from."),
];
