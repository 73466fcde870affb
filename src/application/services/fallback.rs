/// Why the inference backend was bypassed. Only selects a more specific
/// lead-in for the document category; it never changes which rule matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DegradedCause {
    Timeout,
    Unreachable,
}

/// Deterministic, network-free responder used whenever the inference backend
/// is unavailable or too slow. Categories are an ordered rule table; the
/// first matching rule wins.
pub struct FallbackResponder {
    assistant_name: String,
}

const DOCUMENT_KEYWORDS: &[&str] = &[
    "analyze",
    "pdf",
    "excel",
    "spreadsheet",
    "document",
    "file",
    "uploaded",
    "data",
];

struct TopicRule {
    keywords: &'static [&'static str],
    reply: &'static str,
}

const TOPIC_RULES: &[TopicRule] = &[
    TopicRule {
        keywords: &["python"],
        reply: "Python is a high-level, interpreted programming language known for its \
                simplicity and readability. It's widely used for web development, data \
                science, AI/ML, automation, and more. Python emphasizes code readability \
                with its clean syntax and is great for beginners and experts alike.",
    },
    TopicRule {
        keywords: &["programming", "code", "coding", "software", "development"],
        reply: "Programming is the process of creating instructions for computers to \
                follow. It involves writing code in various languages like Python, \
                JavaScript, Java, etc. Programming helps solve problems, automate tasks, \
                and build applications that make our lives easier.",
    },
    TopicRule {
        keywords: &[
            "ai",
            "artificial intelligence",
            "machine learning",
            "ml",
            "neural network",
        ],
        reply: "Artificial Intelligence (AI) is technology that enables machines to \
                simulate human intelligence. Machine Learning is a subset of AI where \
                systems learn from data to make predictions or decisions. It's used in \
                everything from recommendation systems to autonomous vehicles.",
    },
    TopicRule {
        keywords: &[
            "web", "website", "html", "css", "javascript", "frontend", "backend",
        ],
        reply: "Web development involves creating websites and web applications. Frontend \
                development focuses on user interfaces (HTML, CSS, JavaScript), while \
                backend development handles server-side logic and databases. Modern web \
                development uses frameworks like React, Vue, Django, and Flask.",
    },
];

const GREETING_KEYWORDS: &[&str] = &["hello", "hi", "hey", "greetings"];
const HELP_KEYWORDS: &[&str] = &["help", "assist", "support"];

impl FallbackResponder {
    pub fn new(assistant_name: impl Into<String>) -> Self {
        Self {
            assistant_name: assistant_name.into(),
        }
    }

    /// Pure given the message, the registry snapshot and the cause. Never
    /// performs I/O and never fails.
    pub fn respond(&self, message: &str, uploaded: &[String], cause: DegradedCause) -> String {
        let lower = message.to_lowercase();

        if contains_any(&lower, DOCUMENT_KEYWORDS) {
            return self.document_reply(uploaded, cause);
        }

        for rule in TOPIC_RULES {
            if contains_any(&lower, rule.keywords) {
                return rule.reply.to_string();
            }
        }

        if contains_any(&lower, GREETING_KEYWORDS) {
            return format!(
                "Hello! I'm {}, your AI assistant. While my main AI service is temporarily \
                 unavailable, I can still help with basic questions about programming, \
                 technology, and general topics. What would you like to know?",
                self.assistant_name
            );
        }

        if contains_any(&lower, HELP_KEYWORDS) {
            return "I'm here to help! Although my advanced AI capabilities are temporarily \
                    offline, I can provide information on programming, technology, and \
                    general topics. Feel free to ask about Python, web development, AI, or \
                    other tech subjects."
                .to_string();
        }

        format!(
            "I understand you're asking about '{message}'. While my main AI service is \
             temporarily unavailable, I'm still here to help with basic questions. Could \
             you try rephrasing your question or ask about programming, technology, or \
             general topics?"
        )
    }

    fn document_reply(&self, uploaded: &[String], cause: DegradedCause) -> String {
        if uploaded.is_empty() {
            return "I don't see any uploaded files. Please upload a PDF first, then ask \
                    me to analyze it."
                .to_string();
        }

        let unavailable = match cause {
            DegradedCause::Timeout => "the AI service timed out",
            DegradedCause::Unreachable => "the AI service is unavailable",
        };

        format!(
            "I can see you have uploaded: {}. However, I'm currently unable to analyze \
             them because {unavailable}. Please try again later.",
            uploaded.join(", ")
        )
    }
}

fn contains_any(message: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|kw| message.contains(kw))
}
