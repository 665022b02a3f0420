//! 意图分类
//!
//! 关键词匹配为主，置信度不足时由调用方回退到外部 LLM 分类器。
//! 置信度规则：问候 0.95；命中意图且识别出学科 0.8，否则 0.7；
//! 未命中时默认提问意图，有学科 0.6，无学科 0.5。

use serde::Serialize;

/// 聊天意图
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Greeting,
    GetProgress,
    GetFeedback,
    AskQuestion,
    GetHelp,
    Motivation,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Greeting => "greeting",
            Intent::GetProgress => "get_progress",
            Intent::GetFeedback => "get_feedback",
            Intent::AskQuestion => "ask_question",
            Intent::GetHelp => "get_help",
            Intent::Motivation => "motivation",
        }
    }

    /// 该意图是否需要外部检索（RAG）
    pub fn wants_retrieval(&self) -> bool {
        matches!(self, Intent::AskQuestion | Intent::GetHelp)
    }
}

impl std::str::FromStr for Intent {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "greeting" => Ok(Intent::Greeting),
            "get_progress" => Ok(Intent::GetProgress),
            "get_feedback" => Ok(Intent::GetFeedback),
            "ask_question" => Ok(Intent::AskQuestion),
            "get_help" => Ok(Intent::GetHelp),
            "motivation" => Ok(Intent::Motivation),
            _ => Err(format!("Unknown intent: {s}")),
        }
    }
}

/// 分类结果
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub intent: Intent,
    pub confidence: f32,
    pub subject: Option<&'static str>,
}

const GREETING_PATTERNS: &[&str] = &[
    "hi",
    "hello",
    "hey",
    "good morning",
    "good evening",
    "how are you",
    "what's up",
];

/// 非问候意图的关键词表（按声明顺序匹配）
const INTENT_PATTERNS: &[(Intent, &[&str])] = &[
    (
        Intent::GetProgress,
        &[
            "progress",
            "how am i doing",
            "my performance",
            "grades",
            "scores",
            "improvement",
        ],
    ),
    (
        Intent::GetFeedback,
        &["feedback", "teacher comments", "what did teacher say", "review"],
    ),
    (
        Intent::AskQuestion,
        &[
            "what is",
            "how do",
            "explain",
            "help me",
            "i don't understand",
            "solve",
            "calculate",
        ],
    ),
    (
        Intent::GetHelp,
        &["help", "stuck", "confused", "don't know", "assistance"],
    ),
    (
        Intent::Motivation,
        &[
            "encourage",
            "motivate",
            "give up",
            "difficult",
            "hard",
            "frustrated",
        ],
    ),
];

const SUBJECT_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "mathematics",
        &[
            "math",
            "mathematics",
            "algebra",
            "geometry",
            "calculus",
            "arithmetic",
            "equation",
        ],
    ),
    (
        "physics",
        &[
            "physics",
            "force",
            "energy",
            "momentum",
            "thermodynamics",
            "mechanics",
        ],
    ),
    (
        "chemistry",
        &[
            "chemistry",
            "chemical",
            "reaction",
            "molecule",
            "compound",
            "element",
        ],
    ),
    (
        "biology",
        &[
            "biology",
            "cell",
            "organism",
            "genetics",
            "evolution",
            "anatomy",
        ],
    ),
    (
        "english",
        &["english", "grammar", "literature", "writing", "essay", "poem"],
    ),
    (
        "history",
        &[
            "history",
            "historical",
            "war",
            "civilization",
            "ancient",
            "medieval",
        ],
    ),
    (
        "geography",
        &[
            "geography",
            "country",
            "continent",
            "climate",
            "map",
            "capital",
        ],
    ),
];

/// 从消息中提取学科
pub fn extract_subject(message: &str) -> Option<&'static str> {
    let message_lower = message.to_lowercase();
    for (subject, keywords) in SUBJECT_KEYWORDS {
        if keywords.iter().any(|kw| message_lower.contains(kw)) {
            return Some(subject);
        }
    }
    None
}

/// 关键词意图分类
pub fn classify(message: &str) -> Classification {
    let message_lower = message.to_lowercase();

    // 问候优先，不带学科
    if GREETING_PATTERNS.iter().any(|p| message_lower.contains(p)) {
        return Classification {
            intent: Intent::Greeting,
            confidence: 0.95,
            subject: None,
        };
    }

    for (intent, patterns) in INTENT_PATTERNS {
        if patterns.iter().any(|p| message_lower.contains(p)) {
            let subject = extract_subject(&message_lower);
            let confidence = if subject.is_some() { 0.8 } else { 0.7 };
            return Classification {
                intent: *intent,
                confidence,
                subject,
            };
        }
    }

    // 默认按提问处理
    let subject = extract_subject(&message_lower);
    let confidence = if subject.is_some() { 0.6 } else { 0.5 };
    Classification {
        intent: Intent::AskQuestion,
        confidence,
        subject,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_greeting_wins_over_other_patterns() {
        let result = classify("Hello, can you explain algebra?");
        assert_eq!(result.intent, Intent::Greeting);
        assert_eq!(result.confidence, 0.95);
        assert_eq!(result.subject, None);
    }

    #[test]
    fn test_progress_intent() {
        let result = classify("How am I doing in physics?");
        assert_eq!(result.intent, Intent::GetProgress);
        assert_eq!(result.confidence, 0.8);
        assert_eq!(result.subject, Some("physics"));
    }

    #[test]
    fn test_intent_without_subject() {
        let result = classify("show me my grades");
        assert_eq!(result.intent, Intent::GetProgress);
        assert_eq!(result.confidence, 0.7);
        assert_eq!(result.subject, None);
    }

    #[test]
    fn test_question_intent_with_subject() {
        let result = classify("explain the quadratic equation");
        assert_eq!(result.intent, Intent::AskQuestion);
        assert_eq!(result.subject, Some("mathematics"));
        assert_eq!(result.confidence, 0.8);
    }

    #[test]
    fn test_default_to_ask_question() {
        let result = classify("photosynthesis in a cell");
        assert_eq!(result.intent, Intent::AskQuestion);
        assert_eq!(result.subject, Some("biology"));
        assert_eq!(result.confidence, 0.6);
    }

    #[test]
    fn test_default_without_subject_is_low_confidence() {
        let result = classify("banana");
        assert_eq!(result.intent, Intent::AskQuestion);
        assert_eq!(result.subject, None);
        assert_eq!(result.confidence, 0.5);
    }

    #[test]
    fn test_motivation_intent() {
        let result = classify("I feel frustrated and want to give up");
        assert_eq!(result.intent, Intent::Motivation);
    }

    #[test]
    fn test_substring_matching_quirk() {
        // 子串匹配："this" 含 "hi"，会被判为问候
        let result = classify("prove this theorem");
        assert_eq!(result.intent, Intent::Greeting);
    }

    #[test]
    fn test_case_insensitive() {
        let result = classify("EXPLAIN Newton's laws of MOTION");
        assert_eq!(result.intent, Intent::AskQuestion);
    }

    #[test]
    fn test_retrieval_intents() {
        assert!(Intent::AskQuestion.wants_retrieval());
        assert!(Intent::GetHelp.wants_retrieval());
        assert!(!Intent::Greeting.wants_retrieval());
        assert!(!Intent::GetProgress.wants_retrieval());
    }

    #[test]
    fn test_intent_roundtrip() {
        for intent in [
            Intent::Greeting,
            Intent::GetProgress,
            Intent::GetFeedback,
            Intent::AskQuestion,
            Intent::GetHelp,
            Intent::Motivation,
        ] {
            assert_eq!(intent.as_str().parse::<Intent>().unwrap(), intent);
        }
    }
}
