//! Instruction prompts for resume screening.
//!
//! Every preset is a [`PromptSpec`]: a persona sentence that sets the model's
//! role, followed by the task it should perform against the resume image and
//! the job description. Centralising them here keeps the wording in one
//! place and lets tests check the exact strings sent to the model.
//!
//! The caller picks a [`Mode`]: one of the fixed [`Preset`]s, or a custom
//! free-text instruction that is forwarded verbatim (even when empty).

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// Pre-filled text of the custom prompt box.
pub const DEFAULT_CUSTOM_PROMPT: &str =
    "Based on the job description, rate the resume on a scale of 1-10 and provide a brief explanation.";

/// Label shown above a custom-mode response.
pub const CUSTOM_LABEL: &str = "Custom Analysis";

/// Tag of the free-text mode.
pub const CUSTOM_TAG: &str = "custom";

/// A persona + task pair. Immutable; resolved to one instruction string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptSpec {
    pub persona: &'static str,
    pub task: &'static str,
}

impl PromptSpec {
    /// The full instruction: persona and task separated by a single space.
    pub fn instruction(&self) -> String {
        format!("{} {}", self.persona, self.task)
    }
}

pub const HR_SUMMARY: PromptSpec = PromptSpec {
    persona: "You are an experienced HR manager with knowledge in Data Science, Full Stack, and Cloud Computing.",
    task: "Based on the resume and job description, provide a brief summary that clearly outlines \
the candidate’s main strengths, potential weaknesses, and overall suitability for the role.",
};

pub const STRENGTH_WEAKNESS: PromptSpec = PromptSpec {
    persona: "You are an experienced HR professional with technical knowledge in Data Science, \
Full Stack Development, and Cloud Computing.",
    task: "Based on the resume and the job description provided, analyze the candidate's strengths \
and weaknesses specifically in relation to the requirements of this role. Provide a concise summary \
highlighting which skills, experiences, and qualifications make the candidate suitable, and which \
areas might need improvement.",
};

pub const TECHNICAL_FIT: PromptSpec = PromptSpec {
    persona: "Act as a technical recruiter.",
    task: "Compare the candidate's resume with the given job description. Identify key strengths and \
weaknesses, and explain how well the candidate fits the role. Provide actionable recommendations on \
whether the candidate should be shortlisted, further trained, or considered for a different role.",
};

pub const SKILLS_GAP: PromptSpec = PromptSpec {
    persona: "You are a professional recruiter with technical expertise.",
    task: "Analyze the resume and job description to identify the candidate’s strengths and technical \
skills, as well as any gaps or weaknesses in their experience or knowledge relevant to the job. \
Provide a clear summary that highlights both strong and weak areas.",
};

pub const ATS_SCANNER: PromptSpec = PromptSpec {
    persona: "You are an automated Applicant Tracking System (ATS) that evaluates resumes for technical \
roles in Data Science, Full Stack Development, and Cloud Computing.",
    task: "Given a candidate's resume and a job description, perform the following analysis:\n\
1. Score the resume's match with the job description on a scale of 0 to 100.\n\
2. Highlight the keywords, skills, and qualifications present that match the job requirements.\n\
3. Identify missing or weak keywords and skills that reduce the match score.\n\
4. Provide a final recommendation: 'Highly Suitable', 'Moderately Suitable', or 'Not Suitable'.\n\n\
Present the output clearly and in a structured ATS-like format.",
};

pub const ALIGNMENT: PromptSpec = PromptSpec {
    persona: "You are an HR expert.",
    task: "Evaluate the candidate's resume against the provided job description. List the candidate’s \
strengths that directly match the role’s requirements, and weaknesses that could impact their \
performance. Provide a final assessment of the candidate's suitability for the position.",
};

pub const MULTI_ROLE: PromptSpec = PromptSpec {
    persona: "You are an experienced HR professional with extensive experience in evaluating candidates \
for technical roles in Data Science, Full Stack Development, DevOps, SDE, Data Analyst, Big Data \
Engineering and Cloud Computing.",
    task: "Given the candidate's resume and multiple job descriptions, analyze the candidate's strengths, \
weaknesses, and overall fit for each role from an HR perspective. For each role, provide:\n\
1. Key strengths relevant to the role\n\
2. Weaknesses or gaps that may affect performance\n\
3. HR insights on cultural fit, potential for growth, and readiness for the role\n\
4. A final recommendation (shortlist, interview, or training needed)\n\n\
Present the analysis role-wise in a clear and professional format suitable for HR decision-making.",
};

/// The fixed set of preset analyses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Preset {
    /// HR summary of strengths, weaknesses and suitability.
    Summary,
    /// Strengths and weaknesses against the role's requirements.
    Skills,
    /// Technical-recruiter fit with a shortlist recommendation.
    Fit,
    /// Strong areas versus gaps.
    SkillsGap,
    /// ATS-style 0–100 match score.
    Scoring,
    /// Requirement-by-requirement alignment.
    Alignment,
    /// Fit against several job descriptions at once.
    MultiRole,
}

impl Preset {
    pub const ALL: [Preset; 7] = [
        Preset::Summary,
        Preset::Skills,
        Preset::Fit,
        Preset::SkillsGap,
        Preset::Scoring,
        Preset::Alignment,
        Preset::MultiRole,
    ];

    pub fn spec(self) -> PromptSpec {
        match self {
            Preset::Summary => HR_SUMMARY,
            Preset::Skills => STRENGTH_WEAKNESS,
            Preset::Fit => TECHNICAL_FIT,
            Preset::SkillsGap => SKILLS_GAP,
            Preset::Scoring => ATS_SCANNER,
            Preset::Alignment => ALIGNMENT,
            Preset::MultiRole => MULTI_ROLE,
        }
    }

    /// Stable kebab-case tag, as accepted by [`FromStr`].
    pub fn tag(self) -> &'static str {
        match self {
            Preset::Summary => "summary",
            Preset::Skills => "skills",
            Preset::Fit => "fit",
            Preset::SkillsGap => "skills-gap",
            Preset::Scoring => "scoring",
            Preset::Alignment => "alignment",
            Preset::MultiRole => "multi-role",
        }
    }

    /// Heading displayed above the model's response.
    pub fn label(self) -> &'static str {
        match self {
            Preset::Summary => "Resume Summary",
            Preset::Skills => "Key Skills",
            Preset::Fit => "Job Fit",
            Preset::SkillsGap => "Skills Gap",
            Preset::Scoring => "ATS Score",
            Preset::Alignment => "Alignment Assessment",
            Preset::MultiRole => "Multi-Role Assessment",
        }
    }

    /// The question a user is asking when choosing this preset.
    pub fn question(self) -> &'static str {
        match self {
            Preset::Summary => "What is the summary of the resume?",
            Preset::Skills => "What are the key skills in the resume?",
            Preset::Fit => "How well does the resume match the job description?",
            Preset::SkillsGap => "How can I improvise my skills to match the job description?",
            Preset::Scoring => {
                "Rate the resume on a scale of 1-10 and provide a brief explanation."
            }
            Preset::Alignment => "Which strengths line up with the role's requirements?",
            Preset::MultiRole => "How does the candidate fit each of several roles?",
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('_', "-");
        Preset::ALL
            .into_iter()
            .find(|p| p.tag() == wanted)
            .ok_or_else(|| {
                let known: Vec<&str> = Preset::ALL.iter().map(|p| p.tag()).collect();
                format!("unknown preset '{s}' (expected one of: {})", known.join(", "))
            })
    }
}

/// The user's selection for one submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "kind", content = "value")]
pub enum Mode {
    Preset(Preset),
    /// Free-text instruction forwarded verbatim. Empty text is allowed.
    Custom(String),
}

impl Mode {
    /// Resolve to the single instruction string sent to the model.
    pub fn instruction(&self) -> Cow<'_, str> {
        match self {
            Mode::Preset(p) => Cow::Owned(p.spec().instruction()),
            Mode::Custom(text) => Cow::Borrowed(text.as_str()),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Mode::Preset(p) => p.label(),
            Mode::Custom(_) => CUSTOM_LABEL,
        }
    }

    /// Tag identifying the mode, `"custom"` for free text.
    pub fn tag(&self) -> &'static str {
        match self {
            Mode::Preset(p) => p.tag(),
            Mode::Custom(_) => CUSTOM_TAG,
        }
    }
}

impl From<Preset> for Mode {
    fn from(p: Preset) -> Self {
        Mode::Preset(p)
    }
}
