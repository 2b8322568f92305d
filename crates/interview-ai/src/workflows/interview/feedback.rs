use serde::{Deserialize, Serialize};

/// The two rounds that share the tier mapper, each with its own authored
/// wording. Coding and system design produce feedback elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackStyle {
    Behavioral,
    Technical,
}

/// Canned qualitative feedback for a percentage score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub feedback: String,
}

struct FeedbackTier {
    floor: f64,
    strengths: [&'static str; 4],
    improvements: [&'static str; 4],
    feedback: &'static str,
}

/// Maps a 0-100 percentage onto the tier table for the given style.
///
/// Tier floors are fixed at 90/80/70/60/50/40/30 with a catch-all bottom
/// tier; the wording is content, the thresholds are contract.
pub fn map_to_feedback(style: FeedbackStyle, percent: f64) -> Feedback {
    let table = match style {
        FeedbackStyle::Behavioral => BEHAVIORAL_TIERS,
        FeedbackStyle::Technical => TECHNICAL_TIERS,
    };

    // The bottom tier's floor is negative infinity, so only a NaN percent
    // can fall through; it lands in the bottom tier as well.
    let tier = table
        .iter()
        .find(|tier| percent >= tier.floor)
        .unwrap_or(&table[table.len() - 1]);

    Feedback {
        strengths: tier.strengths.iter().map(|s| s.to_string()).collect(),
        improvements: tier.improvements.iter().map(|s| s.to_string()).collect(),
        feedback: tier.feedback.to_string(),
    }
}

static BEHAVIORAL_TIERS: &[FeedbackTier] = &[
    FeedbackTier {
        floor: 90.0,
        strengths: [
            "Outstanding self-awareness",
            "Clear articulation of behavioral traits",
            "Strong alignment with role expectations",
            "Structured storytelling using STAR format",
        ],
        improvements: [
            "Include more measurable impact",
            "Provide diverse examples across roles",
            "Avoid overly rehearsed tone",
            "Add more emotional intelligence cues",
        ],
        feedback: "Impressive! Your behavioral responses showcase clarity, structure, and strong alignment with professional values. You communicated your experience with precision and confidence. To refine further, try adding metrics or specific impact details. Overall, you're well-prepared for top-tier behavioral interviews.",
    },
    FeedbackTier {
        floor: 80.0,
        strengths: [
            "Confident expression",
            "Well-structured STAR answers",
            "Relevant experiences shared",
            "Consistent tone and clarity",
        ],
        improvements: [
            "Add more context to situations",
            "Explain results more concretely",
            "Avoid redundancy across answers",
            "Highlight team impact more explicitly",
        ],
        feedback: "Great job! Your answers were coherent, well-structured, and relevant. You've clearly practiced and understand how to frame experiences. Focus now on making outcomes more measurable and highlighting team dynamics. This will elevate your performance further.",
    },
    FeedbackTier {
        floor: 70.0,
        strengths: [
            "Good awareness of behavioral expectations",
            "Clear attempt at STAR format",
            "Relevant life experiences used",
            "Effort toward structuring responses",
        ],
        improvements: [
            "Improve depth of action/results",
            "Elaborate on challenges overcome",
            "Avoid generic phrasing",
            "Clarify your unique contributions",
        ],
        feedback: "Solid foundation! You're using the right structure and sharing relevant content. To level up, enrich your answers with more specific outcomes and highlight what made your role impactful. Try to go beyond surface-level examples where possible.",
    },
    FeedbackTier {
        floor: 60.0,
        strengths: [
            "Basic structure present",
            "Effort to answer every question",
            "Some use of STAR components",
            "Attempted relevance to role",
        ],
        improvements: [
            "Provide more concrete situations",
            "Use less vague language",
            "Clarify tasks and outcomes",
            "Avoid filler and repetition",
        ],
        feedback: "You're making good progress. Your answers follow a recognizable structure, but need more precision and clarity. Consider reviewing strong STAR responses to understand what makes them stand out. Focus on being specific, and avoid vague generalizations.",
    },
    FeedbackTier {
        floor: 50.0,
        strengths: [
            "Willingness to engage all questions",
            "Some understanding of behavioral cues",
            "Mentioned personal or team experiences",
            "Basic clarity in delivery",
        ],
        improvements: [
            "Add structure (STAR)",
            "Support claims with examples",
            "Be more specific about outcomes",
            "Avoid overgeneralizing strengths",
        ],
        feedback: "You're demonstrating potential, but many responses were either too general or lacked clear structure. Start using STAR consciously and focus on actions you took and the outcomes that followed. Practice writing and reviewing answers to commonly asked behavioral questions.",
    },
    FeedbackTier {
        floor: 40.0,
        strengths: [
            "Engaged actively throughout",
            "Mentioned soft skills",
            "Some relevant scenarios shared",
            "Tried to reflect on experiences",
        ],
        improvements: [
            "Avoid tangents or unrelated stories",
            "Use a logical sequence",
            "Improve delivery confidence",
            "Be more outcome-focused",
        ],
        feedback: "There's clear effort, and you show interest in communicating honestly. However, many answers felt unstructured or lacked clear direction. Begin practicing behavioral formats and think of clear examples that show growth, teamwork, or leadership. You're on the right path, keep building!",
    },
    FeedbackTier {
        floor: 30.0,
        strengths: [
            "Completed all responses",
            "Recognized behavioral cues",
            "Mentioned some role-relevant terms",
            "Attempted self-expression",
        ],
        improvements: [
            "Improve fluency and clarity",
            "Avoid repeating the same points",
            "Use concrete examples, not theory",
            "Highlight your thought process clearly",
        ],
        feedback: "You are making an honest effort, which is valuable. Focus on identifying clear experiences that show your adaptability or problem-solving in real situations. Practice with a peer or mentor for feedback. Keep working on expressing ideas in a structured way.",
    },
    FeedbackTier {
        floor: f64::NEG_INFINITY,
        strengths: [
            "Made an effort to respond",
            "Stayed engaged through all questions",
            "Tried to express opinions",
            "Displayed basic understanding of soft skills",
        ],
        improvements: [
            "Review what behavioral interviews test",
            "Learn and apply STAR method",
            "Avoid filler or vague responses",
            "Use relevant personal stories",
        ],
        feedback: "Your answers need significant improvement. Start by understanding what interviewers look for: self-awareness, communication, and alignment with role values. Practice framing clear, structured answers using real situations. Watching sample responses online and practicing aloud can be helpful. Don't give up!",
    },
];

static TECHNICAL_TIERS: &[FeedbackTier] = &[
    FeedbackTier {
        floor: 90.0,
        strengths: [
            "Exceptional articulation of ideas",
            "Depth in technical explanation",
            "Well-structured responses",
            "Clear scalability reasoning",
        ],
        improvements: [
            "Mention alternatives where relevant",
            "Include specific tools or frameworks",
            "Discuss trade-offs explicitly",
            "Support with industry examples",
        ],
        feedback: "Fantastic work! Your responses were precise, well-structured, and showed great depth of understanding. You effectively addressed problem-solving, trade-offs, and design elements. To go even further, try citing real-world tools or alternate approaches. You're well-prepared for high-stakes technical interviews and leadership discussions.",
    },
    FeedbackTier {
        floor: 80.0,
        strengths: [
            "Strong technical foundation",
            "Clear logical flow",
            "Good example usage",
            "Confident explanation style",
        ],
        improvements: [
            "Clarify assumptions early",
            "Strengthen performance considerations",
            "Detail edge case handling",
            "Include brief architectural diagrams if possible",
        ],
        feedback: "Great job! Your answers consistently reflected strong technical understanding. You used real-world examples effectively and maintained a confident flow. To further refine your approach, emphasize clarity in assumptions and deepen system-level details. You're nearly at the expert level, just polish your presentation.",
    },
    FeedbackTier {
        floor: 70.0,
        strengths: [
            "Good grasp of key concepts",
            "Logical structuring of ideas",
            "Effort to address core topics",
            "Some real-world connections made",
        ],
        improvements: [
            "Avoid surface-level statements",
            "Explain choices more deeply",
            "Highlight pros/cons of decisions",
            "Use consistent technical vocabulary",
        ],
        feedback: "Solid performance. You show a clear grasp of the fundamentals and structure your answers well. To push further, deepen your reasoning, justify your decisions clearly, and connect responses to practical systems. You're close to strong interview readiness.",
    },
    FeedbackTier {
        floor: 60.0,
        strengths: [
            "Basic structure in responses",
            "Attempted to reason logically",
            "Covered fundamental points",
            "Tried applying concepts practically",
        ],
        improvements: [
            "Use more examples and analogies",
            "Improve clarity and fluency",
            "Reduce vagueness in answers",
            "Reinforce concepts with diagrams or visuals",
        ],
        feedback: "You're on the right track. While your answers included many key ideas, they lacked precision and technical fluency. Improving clarity, adding structured reasoning, and reviewing core design patterns will boost your technical narrative significantly.",
    },
    FeedbackTier {
        floor: 50.0,
        strengths: [
            "Attempted relevant responses",
            "Basic understanding of concepts",
            "Some technical terms used correctly",
            "Demonstrated willingness to explain",
        ],
        improvements: [
            "Avoid repeating vague points",
            "Add system-level structure",
            "Justify answers with reasoning",
            "Review design basics more thoroughly",
        ],
        feedback: "Fair effort. You seem to understand some of the basics but lacked depth and clarity. Focus on improving answer structure, practicing with common patterns, and using mock questions to organize your thoughts clearly. You're improving, keep going.",
    },
    FeedbackTier {
        floor: 40.0,
        strengths: [
            "Recognized some key concepts",
            "Tried to stay on topic",
            "Effort evident throughout",
            "Used a few correct terms",
        ],
        improvements: [
            "Clarify what each component does",
            "Structure answers from high to low level",
            "Stop when unsure to avoid rambling",
            "Use consistent terminology",
        ],
        feedback: "There's clear effort in your responses, and you've picked up some concepts. However, many answers lack structure and correctness. Focus on organizing answers using a top-down approach and review how real systems work. With practice, you can steadily improve.",
    },
    FeedbackTier {
        floor: 30.0,
        strengths: [
            "Participated fully",
            "Attempted each answer",
            "Occasionally on-topic",
            "Willingness to express ideas",
        ],
        improvements: [
            "Revise core system concepts",
            "Use examples instead of definitions",
            "Avoid filler phrases",
            "Structure responses logically",
        ],
        feedback: "Your responses show persistence but indicate a need to revisit key technical concepts. Try to understand component roles in systems and focus on explanation patterns like 'What, Why, How.' Practicing these will greatly improve clarity and confidence.",
    },
    FeedbackTier {
        floor: f64::NEG_INFINITY,
        strengths: [
            "Attempted to answer questions",
            "Stayed engaged throughout",
            "Showed basic enthusiasm",
            "Recognized familiar terms",
        ],
        improvements: [
            "Review foundational topics like DBs, APIs, etc.",
            "Avoid off-topic rambling",
            "Learn simple system design patterns",
            "Practice verbal explanation of known topics",
        ],
        feedback: "At this stage, it's essential to go back to basics. Focus on understanding fundamental components of systems and how they interact. Work through beginner-level design problems and practice articulating them clearly. With time and effort, your responses will improve significantly.",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    fn tier_index(style: FeedbackStyle, percent: f64) -> usize {
        let probe = map_to_feedback(style, percent);
        let table = match style {
            FeedbackStyle::Behavioral => BEHAVIORAL_TIERS,
            FeedbackStyle::Technical => TECHNICAL_TIERS,
        };
        table
            .iter()
            .position(|tier| tier.feedback == probe.feedback)
            .expect("feedback came from the table")
    }

    #[test]
    fn every_tier_has_four_strengths_four_improvements_and_feedback() {
        for style in [FeedbackStyle::Behavioral, FeedbackStyle::Technical] {
            for percent in [0.0, 15.0, 30.0, 45.0, 55.0, 65.0, 75.0, 85.0, 95.0, 100.0] {
                let feedback = map_to_feedback(style, percent);
                assert_eq!(feedback.strengths.len(), 4);
                assert_eq!(feedback.improvements.len(), 4);
                assert!(!feedback.feedback.is_empty());
            }
        }
    }

    #[test]
    fn tiers_are_monotonic_across_every_boundary() {
        for style in [FeedbackStyle::Behavioral, FeedbackStyle::Technical] {
            let mut last = tier_index(style, 0.0);
            for boundary in [30.0, 40.0, 50.0, 60.0, 70.0, 80.0, 90.0] {
                let below = tier_index(style, boundary - 0.1);
                let at = tier_index(style, boundary);
                // Lower index = higher tier; crossing a boundary must move up.
                assert!(at < below, "boundary {boundary} did not raise the tier");
                assert!(at <= last);
                last = at;
            }
        }
    }

    #[test]
    fn eighty_five_percent_lands_in_the_eighties_bucket() {
        let feedback = map_to_feedback(FeedbackStyle::Technical, 85.0);
        assert!(feedback.feedback.starts_with("Great job!"));
    }

    #[test]
    fn styles_carry_independent_wording() {
        let behavioral = map_to_feedback(FeedbackStyle::Behavioral, 95.0);
        let technical = map_to_feedback(FeedbackStyle::Technical, 95.0);
        assert_ne!(behavioral.feedback, technical.feedback);
    }
}
