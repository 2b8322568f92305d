use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

use super::{ClientError, CodeJudge};
use crate::config::ScoringConfig;

/// Languages the judging service accepts, with their numeric identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JudgeLanguage {
    Python,
    Javascript,
    Java,
    C,
    Cpp,
}

impl JudgeLanguage {
    pub fn id(&self) -> u32 {
        match self {
            JudgeLanguage::Python => 71,
            JudgeLanguage::Javascript => 63,
            JudgeLanguage::Java => 62,
            JudgeLanguage::C => 50,
            JudgeLanguage::Cpp => 54,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            JudgeLanguage::Python => "python",
            JudgeLanguage::Javascript => "javascript",
            JudgeLanguage::Java => "java",
            JudgeLanguage::C => "c",
            JudgeLanguage::Cpp => "cpp",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "python" => Some(JudgeLanguage::Python),
            "javascript" => Some(JudgeLanguage::Javascript),
            "java" => Some(JudgeLanguage::Java),
            "c" => Some(JudgeLanguage::C),
            "cpp" => Some(JudgeLanguage::Cpp),
            _ => None,
        }
    }

    /// Fixed starter snippet shown in the editor for this language.
    pub fn boilerplate(&self) -> &'static str {
        match self {
            JudgeLanguage::Python => {
                "# Read inputs like this\na = input()\nb = input()\n\n# Write your logic here\nprint(a)\nprint(b)\n"
            }
            JudgeLanguage::Javascript => {
                "const readline = require('readline');\nconst rl = readline.createInterface({\n  input: process.stdin,\n  output: process.stdout\n});\nlet input = [];\nrl.on('line', (line) => {\n  input.push(line);\n  if (input.length === 2) {\n    console.log(input[0]);\n    console.log(input[1]);\n    rl.close();\n  }\n});\n"
            }
            JudgeLanguage::Java => {
                "import java.util.Scanner;\npublic class Main {\n  public static void main(String[] args) {\n    Scanner sc = new Scanner(System.in);\n    String a = sc.nextLine();\n    String b = sc.nextLine();\n\n    System.out.println(a);\n    System.out.println(b);\n  }\n}\n"
            }
            JudgeLanguage::C => {
                "#include <stdio.h>\nint main() {\n  char a[100], b[100];\n  scanf(\"%s\", a);\n  scanf(\"%s\", b);\n  printf(\"%s\\n\", a);\n  printf(\"%s\\n\", b);\n  return 0;\n}\n"
            }
            JudgeLanguage::Cpp => {
                "#include <iostream>\nusing namespace std;\nint main() {\n  string a, b;\n  cin >> a >> b;\n  cout << a << endl;\n  cout << b << endl;\n  return 0;\n}\n"
            }
        }
    }

    pub fn ordered() -> [JudgeLanguage; 5] {
        [
            JudgeLanguage::Python,
            JudgeLanguage::Javascript,
            JudgeLanguage::Java,
            JudgeLanguage::C,
            JudgeLanguage::Cpp,
        ]
    }
}

/// One code execution request: the full source, language, and stdin.
#[derive(Debug, Clone)]
pub struct JudgeSubmission {
    pub source_code: String,
    pub language: JudgeLanguage,
    pub stdin: String,
}

/// Verdict for one execution. `output` has already fallen back through
/// stdout, stderr, and compiler output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JudgeRun {
    pub output: String,
    pub accepted: bool,
}

#[derive(Debug, Serialize)]
struct SubmitBody<'a> {
    source_code: &'a str,
    language_id: u32,
    stdin: &'a str,
}

#[derive(Debug, Deserialize)]
struct SubmitResponse {
    token: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct PollResponse {
    status: Option<PollStatus>,
    stdout: Option<String>,
    stderr: Option<String>,
    compile_output: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PollStatus {
    id: i64,
}

const STATUS_ACCEPTED: i64 = 3;

/// Client for a judge0-style execution service: submit once, then poll the
/// token until a terminal status or the retry budget runs out.
#[derive(Clone)]
pub struct Judge0Client {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    poll_attempts: u32,
    poll_delay: Duration,
}

impl Judge0Client {
    pub fn new(client: Client, config: &ScoringConfig) -> Self {
        Self {
            client,
            base_url: config.judge_url.trim_end_matches('/').to_string(),
            api_key: config.judge_api_key.clone(),
            poll_attempts: config.judge_poll_attempts,
            poll_delay: config.judge_poll_delay,
        }
    }

    fn with_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => request
                .header("X-RapidAPI-Key", key)
                .header("X-RapidAPI-Host", "judge0-ce.p.rapidapi.com"),
            None => request,
        }
    }
}

#[async_trait]
impl CodeJudge for Judge0Client {
    async fn execute(&self, submission: JudgeSubmission) -> Result<JudgeRun, ClientError> {
        let submit_url = format!(
            "{}/submissions?base64_encoded=false&wait=false",
            self.base_url
        );
        let body = SubmitBody {
            source_code: &submission.source_code,
            language_id: submission.language.id(),
            stdin: &submission.stdin,
        };

        let response = self
            .with_auth(self.client.post(&submit_url))
            .json(&body)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status(status.as_u16()));
        }

        let submitted: SubmitResponse = response
            .json()
            .await
            .map_err(|err| ClientError::MalformedResponse(err.to_string()))?;
        let token = submitted
            .token
            .ok_or_else(|| ClientError::MalformedResponse("no token received".to_string()))?;

        // Bounded poll; if the budget runs out we proceed with whatever was
        // last read rather than failing the whole case.
        let poll_url = format!(
            "{}/submissions/{}?base64_encoded=false",
            self.base_url, token
        );
        let mut last = PollResponse::default();
        for attempt in 0..self.poll_attempts {
            let response = self.with_auth(self.client.get(&poll_url)).send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(ClientError::Status(status.as_u16()));
            }
            last = response
                .json()
                .await
                .map_err(|err| ClientError::MalformedResponse(err.to_string()))?;

            if last.status.as_ref().is_some_and(|s| s.id > 2) {
                debug!(token, attempt, "judge reached terminal status");
                break;
            }
            tokio::time::sleep(self.poll_delay).await;
        }

        if !last.status.as_ref().is_some_and(|s| s.id > 2) {
            warn!(token, "judge poll budget exhausted; using partial result");
        }

        let accepted = last.status.as_ref().is_some_and(|s| s.id == STATUS_ACCEPTED);
        let output = last
            .stdout
            .filter(|out| !out.is_empty())
            .or(last.stderr.filter(|out| !out.is_empty()))
            .or(last.compile_output.filter(|out| !out.is_empty()))
            .unwrap_or_else(|| "No output".to_string());

        Ok(JudgeRun { output, accepted })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_table_matches_judge_identifiers() {
        assert_eq!(JudgeLanguage::Python.id(), 71);
        assert_eq!(JudgeLanguage::Javascript.id(), 63);
        assert_eq!(JudgeLanguage::Java.id(), 62);
        assert_eq!(JudgeLanguage::C.id(), 50);
        assert_eq!(JudgeLanguage::Cpp.id(), 54);
    }

    #[test]
    fn every_language_ships_a_boilerplate() {
        for language in JudgeLanguage::ordered() {
            assert!(!language.boilerplate().is_empty());
            assert_eq!(JudgeLanguage::parse(language.name()), Some(language));
        }
        assert_eq!(JudgeLanguage::parse("COBOL"), None);
    }
}
