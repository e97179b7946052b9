//! Brain Module Tests
//!
//! Classification priority and anchoring, reply composition, knowledge
//! updates and the streaming adapter.

use crate::brain::{
    word_chunks, IntentClassifier, IntentDefinition, IntentTier, KnowledgeBase, LuckyResponder,
    StreamingAdapter,
};
use crate::config::{ResponderConfig, DEFAULT_RESPONSE};
use std::sync::Arc;

fn fast_config() -> ResponderConfig {
    ResponderConfig {
        stream_delay_ms: 0,
        ..ResponderConfig::default()
    }
}

#[cfg(test)]
mod intent_classifier_tests {
    use super::*;

    #[test]
    fn test_every_builtin_intent_is_reachable() {
        let classifier = IntentClassifier::new();

        let cases = vec![
            ("hello", "greeting"),
            ("please introduce yourself", "introduction"),
            ("see you later", "farewell"),
            ("ok thanks a lot", "thanks"),
            ("how are you doing today", "how_are_you"),
            ("what can you do", "capabilities"),
            ("who are you?", "identity"),
            ("tell me a joke", "casual_chat"),
            ("my name is Max", "user_name"),
            ("what do you mean by that", "clarification"),
            ("tell me more about that", "deep_dive"),
            ("what is a cell? and what is an atom?", "multi_question"),
            ("tell me a fun fact", "general_knowledge"),
            ("I'm stuck on something", "problem_solving"),
            ("teach me something new", "learning_support"),
            ("brainstorm some ideas", "creativity"),
            ("my dog ate chocolate", "pet_emergency"),
            ("when should my puppy get vaccinated", "vaccination"),
            ("my cat has fleas", "parasite_control"),
            ("my dog has bad breath", "dental_care"),
            ("what dog food is best", "pet_nutrition"),
            ("my dog keeps barking", "pet_behavior"),
            ("how do I groom a long haired cat", "grooming"),
            ("when should I spay my cat", "spay_neuter"),
            ("caring for an old dog", "senior_pets"),
            ("I want a pet rabbit", "exotic_pets"),
            ("how often should i walk my dog", "dog_care"),
            ("adopting a kitten", "cat_care"),
            ("should i take my pet to the vet", "pet_health"),
            ("what is algebra", "mathematics_education"),
            ("explain photosynthesis please", "science_education"),
            ("tell me about the roman empire", "history_education"),
            ("help with my essay", "language_arts"),
            ("learn python programming", "computer_science_education"),
            ("what is the capital of france", "geography_education"),
            ("drawing for beginners", "art_education"),
            ("how to play guitar", "music_education"),
            ("best exercise for teens", "physical_education"),
            ("what causes inflation", "economics_education"),
            ("learning spanish", "foreign_languages"),
            ("what is ethics", "philosophy_education"),
            ("how are subjects connected", "cross_subject_connections"),
            ("stem activities for kids", "stem_integration"),
            ("why study the humanities", "humanities_integration"),
            ("when will i ever use this", "real_world_applications"),
            ("ideas for a school project", "project_based_learning"),
            ("tell me about climate change", "global_perspectives"),
            ("study tips please", "study_tips"),
            ("tips to memorize faster", "memory_techniques"),
            ("prepare for my exam", "exam_preparation"),
            ("i always procrastinate", "time_management"),
            ("i feel unmotivated", "motivation"),
            ("critical thinking skills", "critical_thinking"),
            ("how to take better notes", "note_taking"),
            ("what is my learning style", "learning_styles"),
            ("growth mindset", "growth_mindset"),
            ("how to cite sources", "research_skills"),
        ];

        assert_eq!(cases.len(), classifier.priority_order().len());

        for (input, expected) in cases {
            let result = classifier.classify(input);
            assert_eq!(
                result.intent.as_deref(),
                Some(expected),
                "Expected {} for '{}'",
                expected,
                input
            );
        }
    }

    #[test]
    fn test_whitespace_only_never_matches() {
        let classifier = IntentClassifier::new();

        for input in ["", " ", "   ", "\t", "\n\n", " \t \n "] {
            let result = classifier.classify(input);
            assert!(!result.is_match(), "Expected no match for {:?}", input);
            assert!(result.tier.is_none());
        }
    }

    #[test]
    fn test_anchored_greeting_only_at_start() {
        let classifier = IntentClassifier::new();

        assert_eq!(
            classifier.classify("hello kitty is cute").intent.as_deref(),
            Some("greeting")
        );
        assert_ne!(
            classifier.classify("I love hello kitty").intent.as_deref(),
            Some("greeting")
        );
        assert_ne!(
            classifier.classify("oh hi there").intent.as_deref(),
            Some("greeting")
        );
    }

    #[test]
    fn test_anchored_farewell_only_at_start() {
        let classifier = IntentClassifier::new();

        assert_eq!(
            classifier.classify("they said goodbye to physics").intent.as_deref(),
            Some("science_education")
        );
    }

    #[test]
    fn test_greeting_word_inside_other_word_does_not_match() {
        let classifier = IntentClassifier::new();

        assert_eq!(
            classifier.classify("history of rome").intent.as_deref(),
            Some("history_education")
        );
    }

    #[test]
    fn test_anchored_user_name_phrases_only_at_start() {
        let classifier = IntentClassifier::new();

        for input in ["i'm called Max", "I am called Luna", "call me Max", "please call me Max"] {
            assert_eq!(
                classifier.classify(input).intent.as_deref(),
                Some("user_name"),
                "Expected user_name for '{}'",
                input
            );
        }
        for input in ["so i'm called Max", "they said i am called nothing", "don't call me that"] {
            assert_ne!(
                classifier.classify(input).intent.as_deref(),
                Some("user_name"),
                "Did not expect user_name for '{}'",
                input
            );
        }
    }

    #[test]
    fn test_every_keyword_intent_matches_inside_a_sentence() {
        let classifier = IntentClassifier::new();

        let keywords = vec![
            ("introduce yourself", "introduction"),
            ("thanks", "thanks"),
            ("how are you", "how_are_you"),
            ("what can you do", "capabilities"),
            ("who are you", "identity"),
            ("tell me a joke", "casual_chat"),
            ("my name is", "user_name"),
            ("what do you mean", "clarification"),
            ("tell me more", "deep_dive"),
            ("several questions", "multi_question"),
            ("fun fact", "general_knowledge"),
            ("help me solve", "problem_solving"),
            ("teach me", "learning_support"),
            ("brainstorm", "creativity"),
            ("poisoning", "pet_emergency"),
            ("rabies", "vaccination"),
            ("fleas", "parasite_control"),
            ("bad breath", "dental_care"),
            ("dog food", "pet_nutrition"),
            ("barking", "pet_behavior"),
            ("grooming", "grooming"),
            ("neutering", "spay_neuter"),
            ("older dogs", "senior_pets"),
            ("hamster", "exotic_pets"),
            ("puppy", "dog_care"),
            ("kitten", "cat_care"),
            ("vet", "pet_health"),
            ("algebra", "mathematics_education"),
            ("photosynthesis", "science_education"),
            ("medieval", "history_education"),
            ("grammar", "language_arts"),
            ("programming", "computer_science_education"),
            ("continents", "geography_education"),
            ("painting", "art_education"),
            ("piano", "music_education"),
            ("fitness", "physical_education"),
            ("inflation", "economics_education"),
            ("spanish", "foreign_languages"),
            ("philosophy", "philosophy_education"),
            ("interdisciplinary", "cross_subject_connections"),
            ("stem", "stem_integration"),
            ("humanities", "humanities_integration"),
            ("real world", "real_world_applications"),
            ("hands-on", "project_based_learning"),
            ("climate change", "global_perspectives"),
            ("study tips", "study_tips"),
            ("mnemonics", "memory_techniques"),
            ("exams", "exam_preparation"),
            ("procrastination", "time_management"),
            ("motivation", "motivation"),
            ("critical thinking", "critical_thinking"),
            ("note-taking", "note_taking"),
            ("visual learner", "learning_styles"),
            ("growth mindset", "growth_mindset"),
            ("citations", "research_skills"),
        ];

        // Everything except the start-anchored greeting and farewell.
        assert_eq!(keywords.len(), classifier.priority_order().len() - 2);

        for (keyword, expected) in keywords {
            for input in [
                format!("ok so {} for me", keyword),
                format!("ok so {}", keyword),
                format!("{} for me", keyword),
            ] {
                assert_eq!(
                    classifier.classify(&input).intent.as_deref(),
                    Some(expected),
                    "Expected {} for '{}'",
                    expected,
                    input
                );
            }
        }
    }

    #[test]
    fn test_unanchored_keyword_matches_anywhere() {
        let classifier = IntentClassifier::new();

        for input in [
            "algebra",
            "algebra is hard",
            "I have a question about algebra homework",
            "so, algebra",
        ] {
            assert_eq!(
                classifier.classify(input).intent.as_deref(),
                Some("mathematics_education"),
                "Expected mathematics_education for '{}'",
                input
            );
        }
    }

    #[test]
    fn test_higher_priority_tier_wins() {
        let classifier = IntentClassifier::new();

        let cases = vec![
            ("bye, by the way what is physics", "farewell"),
            ("thanks for the algebra help", "thanks"),
            ("hello, can you help me with algebra", "greeting"),
            ("how to memorize vocabulary faster", "language_arts"),
        ];

        for (input, expected) in cases {
            assert_eq!(
                classifier.classify(input).intent.as_deref(),
                Some(expected),
                "Expected {} for '{}'",
                expected,
                input
            );
        }
    }

    #[test]
    fn test_result_reports_tier_and_pattern() {
        let classifier = IntentClassifier::new();

        let result = classifier.classify("bye, by the way what is physics");
        assert_eq!(result.tier, Some(IntentTier::Conversational));
        assert!(result.matched_pattern.unwrap().starts_with('^'));

        let result = classifier.classify("what is algebra");
        assert_eq!(result.tier, Some(IntentTier::Education));
    }

    #[test]
    fn test_custom_table_keeps_first_hit_within_tier() {
        let classifier = IntentClassifier::from_definitions(vec![
            IntentDefinition::compile("broad", IntentTier::Education, &[r"\bscience\b"]).unwrap(),
            IntentDefinition::compile("narrow", IntentTier::Education, &[r"\bcomputer science\b"])
                .unwrap(),
        ]);

        assert_eq!(
            classifier.classify("computer science").intent.as_deref(),
            Some("broad")
        );
    }

    #[test]
    fn test_unknown_input() {
        let classifier = IntentClassifier::new();

        for input in ["xyz abc 123", "tell me about quantum", "!@#$%^&*"] {
            assert!(!classifier.classify(input).is_match(), "Expected no match for '{}'", input);
        }
    }
}

#[cfg(test)]
mod responder_tests {
    use super::*;

    #[test]
    fn test_hello_returns_greeting_entry() {
        let responder = LuckyResponder::new(&fast_config());
        let expected = KnowledgeBase::new().get("greeting").unwrap();

        let reply = responder.reply("hello");
        assert_eq!(reply.intent.as_deref(), Some("greeting"));
        assert_eq!(reply.text, expected);
    }

    #[test]
    fn test_name_is_templated() {
        let responder = LuckyResponder::new(&fast_config());

        let result = responder.classify("my name is Max");
        assert_eq!(result.intent.as_deref(), Some("user_name"));
        assert_eq!(result.extracted_groups, Some(vec!["Max".to_string()]));

        let text = responder.generate_response("my name is Max");
        assert!(text.contains("Max"), "Expected name in '{}'", text);
        assert!(text.starts_with("Nice to meet you, Max!"));
    }

    #[test]
    fn test_name_with_trailing_text() {
        let responder = LuckyResponder::new(&fast_config());

        let text = responder.generate_response("Call me luna, and I have two cats");
        assert!(text.contains("Luna"));
        assert!(text.contains("and I have two cats"));
    }

    #[test]
    fn test_failed_extraction_falls_back_to_knowledge() {
        let responder = LuckyResponder::new(&fast_config());

        let result = responder.classify("my name is 42");
        assert_eq!(result.intent.as_deref(), Some("user_name"));
        assert!(result.extracted_groups.is_none());

        assert_eq!(
            responder.generate_response("my name is 42"),
            KnowledgeBase::new().get("user_name").unwrap()
        );
    }

    #[test]
    fn test_call_me_without_a_name_is_not_templated() {
        let responder = LuckyResponder::new(&fast_config());
        let user_name_entry = KnowledgeBase::new().get("user_name").unwrap();

        let reply = responder.reply("please call me back later");
        assert_eq!(reply.intent.as_deref(), Some("user_name"));
        assert_eq!(reply.text, user_name_entry);

        let reply = responder.reply("don't call me that");
        assert_ne!(reply.intent.as_deref(), Some("user_name"));
        assert!(!reply.text.contains("Nice to meet you"));
    }

    #[test]
    fn test_name_found_after_a_non_name() {
        let responder = LuckyResponder::new(&fast_config());

        let text = responder.generate_response("don't call me that, my name is Max");
        assert!(text.starts_with("Nice to meet you, Max!"), "Unexpected reply '{}'", text);
    }

    #[test]
    fn test_empty_input_returns_default() {
        let responder = LuckyResponder::new(&fast_config());

        for input in ["", "   ", "\n"] {
            let reply = responder.reply(input);
            assert!(reply.intent.is_none());
            assert_eq!(reply.text, DEFAULT_RESPONSE);
        }
    }

    #[test]
    fn test_default_response_is_configurable() {
        let config = ResponderConfig {
            default_response: "Ask me about pets!".to_string(),
            ..fast_config()
        };
        let responder = LuckyResponder::new(&config);

        assert_eq!(responder.generate_response("xyz abc 123"), "Ask me about pets!");
    }

    #[test]
    fn test_keyword_reply_is_verbatim_entry() {
        let responder = LuckyResponder::new(&fast_config());

        assert_eq!(
            responder.generate_response("what is algebra"),
            KnowledgeBase::new().get("mathematics_education").unwrap()
        );
    }

    #[test]
    fn test_priority_reply_uses_farewell_entry() {
        let responder = LuckyResponder::new(&fast_config());
        let kb = KnowledgeBase::new();

        let text = responder.generate_response("bye, by the way what is physics");
        assert_eq!(text, kb.get("farewell").unwrap());
        assert_ne!(text, kb.get("science_education").unwrap());
    }

    #[test]
    fn test_add_knowledge_is_immediately_visible() {
        let responder = LuckyResponder::new(&fast_config());

        responder.add_knowledge("greeting", "X");
        assert_eq!(responder.generate_response("hello"), "X");

        responder.add_knowledge("GREETING", "Y");
        assert_eq!(responder.generate_response("hello"), "Y");
    }

    #[test]
    fn test_new_knowledge_needs_an_intent_to_be_reached() {
        let responder = LuckyResponder::new(&fast_config());

        responder.add_knowledge("quantum", "Quantum physics studies very small things.");
        assert_eq!(
            responder.knowledge("Quantum").as_deref(),
            Some("Quantum physics studies very small things.")
        );
        assert_eq!(responder.generate_response("tell me about quantum"), DEFAULT_RESPONSE);
    }

    #[test]
    fn test_missing_entry_yields_placeholder() {
        let responder =
            LuckyResponder::with_knowledge(&fast_config(), Arc::new(KnowledgeBase::empty()));

        let text = responder.generate_response("hello");
        assert!(!text.is_empty());
        assert!(text.contains("greeting"), "Expected key in '{}'", text);

        assert_eq!(responder.generate_response(""), DEFAULT_RESPONSE);
    }

    #[test]
    fn test_injected_stores_are_isolated() {
        let first = LuckyResponder::new(&fast_config());
        let second = LuckyResponder::new(&fast_config());

        first.add_knowledge("greeting", "changed");
        assert_ne!(second.generate_response("hello"), "changed");
    }

    #[test]
    fn test_every_builtin_intent_has_knowledge() {
        let classifier = IntentClassifier::new();
        let kb = KnowledgeBase::new();

        for (name, _) in classifier.priority_order() {
            assert!(kb.contains(name), "Missing knowledge entry for '{}'", name);
        }
    }
}

#[cfg(test)]
mod streaming_tests {
    use super::*;
    use futures::StreamExt;
    use std::time::{Duration, Instant};

    #[tokio::test]
    async fn test_stream_reconstructs_response() {
        let responder = LuckyResponder::new(&fast_config());
        let expected = responder.generate_response("what is algebra");

        let mut chunks = Vec::new();
        let reply = responder
            .stream_response("what is algebra", |chunk| chunks.push(chunk))
            .await;

        assert_eq!(reply.text, expected);
        assert!(chunks.len() > 1);
        assert_eq!(chunks.concat(), expected);
        for chunk in &chunks[..chunks.len() - 1] {
            assert!(chunk.ends_with(' '), "Chunk {:?} should end with a space", chunk);
        }
    }

    #[tokio::test]
    async fn test_async_stream_matches_iterator() {
        let adapter = StreamingAdapter::new(Duration::ZERO);
        let text = "Nice to meet you,  Max! ";

        let streamed: Vec<String> = adapter.stream(text.to_string()).collect().await;
        let iterated: Vec<String> = word_chunks(text).map(str::to_string).collect();

        assert_eq!(streamed, iterated);
        assert_eq!(streamed.concat(), text);
    }

    #[tokio::test]
    async fn test_delay_between_chunks() {
        let adapter = StreamingAdapter::new(Duration::from_millis(10));

        let started = Instant::now();
        let mut received = String::new();
        let count = adapter.emit("one two three", |c| received.push_str(&c)).await;

        assert_eq!(count, 3);
        assert_eq!(received, "one two three");
        assert!(started.elapsed() >= Duration::from_millis(20));
    }

    #[tokio::test]
    async fn test_response_stream_from_responder() {
        let responder = LuckyResponder::new(&fast_config());

        let chunks: Vec<String> = responder.response_stream("hello").collect().await;
        assert_eq!(chunks.concat(), responder.generate_response("hello"));
    }
}
