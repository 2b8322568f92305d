use super::domain::{CodingProblem, Question, Role, RoundKind};
use serde_json::json;

/// Static question bank backing all four rounds.
///
/// Records live in dataset order; truncation to per-round maximums is the
/// consumer's job, so the accessor stays deterministic.
#[derive(Debug, Default)]
pub struct QuestionBank;

struct QuestionRecord {
    category: &'static str,
    question: &'static str,
    ideal_answer: &'static str,
    keywords: &'static [&'static str],
}

impl QuestionBank {
    pub fn standard() -> Self {
        Self
    }

    /// Free-text questions for a role and round, filtered by the round's
    /// category tag. Unknown combinations (e.g. the coding round, which has
    /// its own typed accessor) yield an empty vector.
    pub fn questions(&self, role: Role, kind: RoundKind) -> Vec<Question> {
        records_for(role)
            .iter()
            .filter(|record| record.category == kind.category())
            .map(|record| Question {
                prompt: record.question.to_string(),
                ideal_answer: record.ideal_answer.to_string(),
                keywords: record.keywords.iter().map(|kw| kw.to_string()).collect(),
            })
            .collect()
    }

    pub fn coding_problems(&self, role: Role) -> Vec<CodingProblem> {
        coding_problems_for(role)
    }
}

fn records_for(role: Role) -> &'static [QuestionRecord] {
    match role {
        Role::Ai => AI_RECORDS,
        Role::Fullstack => FULLSTACK_RECORDS,
        Role::Security => SECURITY_RECORDS,
        Role::Devops => DEVOPS_RECORDS,
    }
}

static AI_RECORDS: &[QuestionRecord] = &[
    QuestionRecord {
        category: "HR",
        question: "Tell me about a time you had to explain a complex model's behavior to a non-technical stakeholder.",
        ideal_answer: "Describe the situation, how you translated model internals into business terms, the visual or analogy you used, and the decision the stakeholder was able to make as a result.",
        keywords: &["communication", "stakeholder", "explainability", "impact"],
    },
    QuestionRecord {
        category: "HR",
        question: "Describe a project where your model underperformed in production. What did you do?",
        ideal_answer: "Cover detecting the regression through monitoring, diagnosing data drift or training-serving skew, the remediation you shipped, and the safeguards added afterwards.",
        keywords: &["monitoring", "drift", "debugging", "ownership"],
    },
    QuestionRecord {
        category: "HR",
        question: "How do you prioritize experiments when several ideas could improve the same metric?",
        ideal_answer: "Explain estimating expected lift against implementation cost, running cheap offline evaluations first, and committing to clear success criteria before each experiment.",
        keywords: &["prioritization", "experiments", "metrics", "tradeoffs"],
    },
    QuestionRecord {
        category: "Technical Round 1",
        question: "What is the difference between bagging and boosting?",
        ideal_answer: "Bagging trains independent models on bootstrap samples and averages them to cut variance; boosting trains models sequentially, each correcting the previous one's errors, reducing bias.",
        keywords: &["bagging", "boosting", "variance", "bias", "ensemble"],
    },
    QuestionRecord {
        category: "Technical Round 1",
        question: "Explain how you would handle class imbalance in a fraud detection dataset.",
        ideal_answer: "Use resampling or class weights, prefer precision-recall metrics over accuracy, consider threshold tuning and anomaly-detection framings, and validate with stratified splits.",
        keywords: &["imbalance", "resampling", "precision", "recall", "class weights"],
    },
    QuestionRecord {
        category: "Technical Round 1",
        question: "What is regularization and why does it help?",
        ideal_answer: "Regularization penalizes model complexity, L1 encouraging sparsity and L2 shrinking weights, which limits overfitting and improves generalization to unseen data.",
        keywords: &["regularization", "L1", "L2", "overfitting", "generalization"],
    },
    QuestionRecord {
        category: "Technical Round 1",
        question: "How does a transformer's attention mechanism work at a high level?",
        ideal_answer: "Each token computes query, key, and value projections; attention weights come from scaled dot products of queries and keys, and the weighted sum of values lets every token attend to the whole sequence.",
        keywords: &["attention", "transformer", "query", "key", "value"],
    },
    QuestionRecord {
        category: "system_design",
        question: "Design a real-time recommendation system for a video streaming platform.",
        ideal_answer: "Cover candidate generation and ranking stages, feature stores for user and item embeddings, online inference latency budgets, feedback loops, and offline retraining pipelines.",
        keywords: &["recommendation", "ranking", "feature store", "latency"],
    },
    QuestionRecord {
        category: "system_design",
        question: "Design an ML inference service that must serve 10k predictions per second.",
        ideal_answer: "Discuss model serving infrastructure, batching, horizontal scaling behind a load balancer, caching hot results, GPU vs CPU tradeoffs, and monitoring for latency and drift.",
        keywords: &["serving", "batching", "scaling", "caching", "monitoring"],
    },
];

static FULLSTACK_RECORDS: &[QuestionRecord] = &[
    QuestionRecord {
        category: "HR",
        question: "Tell me about a time you disagreed with a teammate about an implementation approach.",
        ideal_answer: "Describe the disagreement, how you compared options with data or a prototype, how you reached a decision together, and what the outcome taught you.",
        keywords: &["collaboration", "conflict", "communication", "compromise"],
    },
    QuestionRecord {
        category: "HR",
        question: "Describe a production incident you handled. What was your role?",
        ideal_answer: "Walk through detection, triage, communication with affected users, the fix, and the postmortem actions that prevented recurrence.",
        keywords: &["incident", "debugging", "postmortem", "ownership"],
    },
    QuestionRecord {
        category: "HR",
        question: "How do you balance shipping quickly against accumulating technical debt?",
        ideal_answer: "Explain making debt visible, agreeing explicit tradeoffs with the team, time-boxing shortcuts with follow-up tickets, and protecting critical paths with tests.",
        keywords: &["technical debt", "prioritization", "tradeoffs", "quality"],
    },
    QuestionRecord {
        category: "Technical Round 1",
        question: "What happens when you type a URL into the browser and press enter?",
        ideal_answer: "DNS resolution, TCP and TLS handshakes, the HTTP request, server-side routing and rendering, then response parsing, DOM construction, and asset loading in the browser.",
        keywords: &["DNS", "TCP", "TLS", "HTTP", "rendering"],
    },
    QuestionRecord {
        category: "Technical Round 1",
        question: "Explain the difference between SQL and NoSQL databases and when you'd choose each.",
        ideal_answer: "Relational stores give strong schemas, joins, and ACID transactions; NoSQL trades schema rigidity for horizontal scale and flexible documents, fitting high-volume or evolving data.",
        keywords: &["SQL", "NoSQL", "ACID", "scalability", "schema"],
    },
    QuestionRecord {
        category: "Technical Round 1",
        question: "How does HTTP caching work?",
        ideal_answer: "Servers set Cache-Control, ETag, and Last-Modified headers; clients and CDNs revalidate with conditional requests, serving 304s when content is unchanged.",
        keywords: &["caching", "ETag", "Cache-Control", "CDN"],
    },
    QuestionRecord {
        category: "Technical Round 1",
        question: "What are the main approaches to authentication in a web application?",
        ideal_answer: "Session cookies backed by server state, stateless JWTs, and delegated OAuth/OIDC flows; compare revocation, scaling, and CSRF/XSS exposure for each.",
        keywords: &["authentication", "session", "JWT", "OAuth"],
    },
    QuestionRecord {
        category: "system_design",
        question: "Design a URL shortening service like bit.ly.",
        ideal_answer: "Cover ID generation without collisions, the redirect read path and its cache, storage layout, analytics, and how the system scales reads far beyond writes.",
        keywords: &["hashing", "cache", "redirect", "scalability"],
    },
    QuestionRecord {
        category: "system_design",
        question: "Design a collaborative document editor like Google Docs.",
        ideal_answer: "Discuss operational transforms or CRDTs for concurrent edits, websocket fan-out, presence, persistence of revisions, and offline reconciliation.",
        keywords: &["CRDT", "websocket", "concurrency", "consistency"],
    },
];

static SECURITY_RECORDS: &[QuestionRecord] = &[
    QuestionRecord {
        category: "HR",
        question: "Tell me about a time you had to convince engineers to fix a vulnerability they considered low priority.",
        ideal_answer: "Describe framing the risk in business terms, demonstrating exploitability, agreeing a remediation timeline, and how the relationship improved afterwards.",
        keywords: &["risk", "communication", "influence", "remediation"],
    },
    QuestionRecord {
        category: "HR",
        question: "Describe how you stay current with emerging threats.",
        ideal_answer: "Mention threat intelligence feeds, advisories, CTFs or lab work, and how you turn new findings into detection rules or hardening tasks for your organization.",
        keywords: &["threat intelligence", "learning", "CVE", "detection"],
    },
    QuestionRecord {
        category: "HR",
        question: "Walk me through how you handled a suspected breach under time pressure.",
        ideal_answer: "Cover containment first, evidence preservation, stakeholder communication, eradication and recovery, and the lessons-learned review.",
        keywords: &["incident response", "containment", "forensics", "communication"],
    },
    QuestionRecord {
        category: "Technical Round 1",
        question: "What is the difference between symmetric and asymmetric encryption?",
        ideal_answer: "Symmetric uses one shared key and is fast for bulk data; asymmetric uses a public/private key pair enabling key exchange and signatures, typically combined in hybrid schemes like TLS.",
        keywords: &["symmetric", "asymmetric", "public key", "TLS"],
    },
    QuestionRecord {
        category: "Technical Round 1",
        question: "Explain SQL injection and how to prevent it.",
        ideal_answer: "Attackers smuggle SQL through unsanitized input; prevent it with parameterized queries, least-privilege database accounts, input validation, and WAF monitoring as defense in depth.",
        keywords: &["SQL injection", "parameterized", "sanitization", "least privilege"],
    },
    QuestionRecord {
        category: "Technical Round 1",
        question: "What is the CIA triad and how does it guide security decisions?",
        ideal_answer: "Confidentiality, integrity, and availability; every control maps to protecting one or more of the three, and tradeoffs between them frame risk discussions.",
        keywords: &["confidentiality", "integrity", "availability", "risk"],
    },
    QuestionRecord {
        category: "Technical Round 1",
        question: "How does a TLS handshake establish a secure channel?",
        ideal_answer: "Client and server negotiate cipher suites, the server proves identity with its certificate chain, key exchange derives a shared session key, and symmetric encryption protects the stream.",
        keywords: &["TLS", "handshake", "certificate", "key exchange"],
    },
    QuestionRecord {
        category: "system_design",
        question: "Design a centralized logging and alerting pipeline for security events across hundreds of services.",
        ideal_answer: "Cover agents and structured log shipping, a scalable ingestion bus, normalization, detection rules and correlation, alert routing with severity, and retention for forensics.",
        keywords: &["SIEM", "ingestion", "correlation", "alerting", "retention"],
    },
    QuestionRecord {
        category: "system_design",
        question: "Design a zero-trust access system for internal applications.",
        ideal_answer: "Discuss identity-aware proxies, device posture checks, short-lived credentials, policy engines evaluating every request, and audit logging.",
        keywords: &["zero trust", "identity", "policy", "audit"],
    },
];

static DEVOPS_RECORDS: &[QuestionRecord] = &[
    QuestionRecord {
        category: "HR",
        question: "Tell me about a deployment that went wrong and how you recovered.",
        ideal_answer: "Describe the failure signal, the rollback or fix-forward call and why, communication during the incident, and the pipeline changes that prevented a repeat.",
        keywords: &["rollback", "incident", "deployment", "postmortem"],
    },
    QuestionRecord {
        category: "HR",
        question: "How do you drive adoption of infrastructure-as-code in a team used to manual changes?",
        ideal_answer: "Explain starting with a high-pain area, pairing on the first modules, review gates that keep drift out, and showing wins through faster, safer changes.",
        keywords: &["infrastructure as code", "adoption", "mentoring", "change management"],
    },
    QuestionRecord {
        category: "HR",
        question: "Describe a time you reduced cloud costs without hurting reliability.",
        ideal_answer: "Cover measuring utilization first, rightsizing and autoscaling, reserved or spot capacity where safe, and validating SLOs stayed intact after the change.",
        keywords: &["cost", "autoscaling", "SLO", "measurement"],
    },
    QuestionRecord {
        category: "Technical Round 1",
        question: "What is the difference between blue-green and canary deployments?",
        ideal_answer: "Blue-green switches all traffic between two identical environments at once; canary shifts a small traffic slice first, watching metrics before progressive rollout.",
        keywords: &["blue-green", "canary", "rollout", "traffic shifting"],
    },
    QuestionRecord {
        category: "Technical Round 1",
        question: "Explain how Kubernetes keeps a deployment at its desired replica count.",
        ideal_answer: "Controllers run reconciliation loops comparing desired state in etcd against observed state, creating or deleting pods through the scheduler until they converge.",
        keywords: &["kubernetes", "reconciliation", "controller", "desired state"],
    },
    QuestionRecord {
        category: "Technical Round 1",
        question: "What belongs in a good CI pipeline for a service?",
        ideal_answer: "Fast feedback stages ordered by cost: lint and unit tests, build artifacts once, integration tests against ephemeral environments, security scanning, and gated promotion.",
        keywords: &["CI", "pipeline", "testing", "artifacts"],
    },
    QuestionRecord {
        category: "Technical Round 1",
        question: "How would you monitor a model-serving workload differently from a stateless web service?",
        ideal_answer: "Beyond latency and errors, track input distribution drift, prediction confidence, feature freshness, and retraining triggers alongside standard resource metrics.",
        keywords: &["monitoring", "drift", "metrics", "mlops"],
    },
    QuestionRecord {
        category: "system_design",
        question: "Design a CI/CD platform for hundreds of microservices.",
        ideal_answer: "Cover shared pipeline templates, artifact registries, environment promotion, secrets management, scalable runners, and deployment strategies with automated rollback.",
        keywords: &["CI/CD", "pipelines", "artifacts", "rollback"],
    },
    QuestionRecord {
        category: "system_design",
        question: "Design a multi-region failover strategy for a stateful service.",
        ideal_answer: "Discuss replication topology and lag, health-based traffic steering, RTO/RPO targets, failover runbooks or automation, and regular game-day testing.",
        keywords: &["failover", "replication", "RTO", "RPO"],
    },
];

fn coding_problems_for(role: Role) -> Vec<CodingProblem> {
    match role {
        Role::Ai => vec![
            CodingProblem {
                prompt: "Read two integers from input and print their dot-product contribution (a * b)."
                    .to_string(),
                inputs: vec![json!([3, 4]), json!([0, 9]), json!([7, 6])],
                expected_outputs: vec![json!(12), json!(0), json!(42)],
                languages: vec!["python".to_string(), "cpp".to_string()],
                difficulty: "easy".to_string(),
            },
            CodingProblem {
                prompt: "Read a line of space-separated numbers and print their arithmetic mean rounded to one decimal place."
                    .to_string(),
                inputs: vec![json!("1 2 3 4"), json!("10 20")],
                expected_outputs: vec![json!("2.5"), json!("15.0")],
                languages: vec!["python".to_string(), "javascript".to_string()],
                difficulty: "easy".to_string(),
            },
        ],
        Role::Fullstack => vec![
            CodingProblem {
                prompt: "Read a string and print it reversed.".to_string(),
                inputs: vec![json!("hello"), json!("abc")],
                expected_outputs: vec![json!("olleh"), json!("cba")],
                languages: vec!["python".to_string(), "javascript".to_string()],
                difficulty: "easy".to_string(),
            },
            CodingProblem {
                prompt: "Read two lines and print them joined by a single space.".to_string(),
                inputs: vec![json!(["hello", "world"]), json!(["full", "stack"])],
                expected_outputs: vec![json!("hello world"), json!("full stack")],
                languages: vec!["python".to_string(), "java".to_string()],
                difficulty: "easy".to_string(),
            },
        ],
        Role::Security => vec![
            CodingProblem {
                prompt: "Read a string and print the count of characters that are hexadecimal digits."
                    .to_string(),
                inputs: vec![json!("deadbeefZZ"), json!("xyz")],
                expected_outputs: vec![json!(8), json!(0)],
                languages: vec!["python".to_string(), "c".to_string()],
                difficulty: "easy".to_string(),
            },
            CodingProblem {
                prompt: "Read an integer n and print the n-th value of a Caesar shift of the lowercase alphabet by 3 (0-indexed)."
                    .to_string(),
                inputs: vec![json!(0), json!(25)],
                expected_outputs: vec![json!("d"), json!("c")],
                languages: vec!["python".to_string()],
                difficulty: "medium".to_string(),
            },
        ],
        Role::Devops => vec![
            CodingProblem {
                prompt: "Read a number of megabytes and print the value in mebibytes-friendly kilobytes (value * 1024)."
                    .to_string(),
                inputs: vec![json!(1), json!(5)],
                expected_outputs: vec![json!(1024), json!(5120)],
                languages: vec!["python".to_string(), "javascript".to_string()],
                difficulty: "easy".to_string(),
            },
            CodingProblem {
                prompt: "Read two version strings on separate lines and print the greater one (simple dotted numeric compare)."
                    .to_string(),
                inputs: vec![json!(["1.2.3", "1.10.0"]), json!(["2.0.0", "1.9.9"])],
                expected_outputs: vec![json!("1.10.0"), json!("2.0.0")],
                languages: vec!["python".to_string()],
                difficulty: "medium".to_string(),
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_role_cannot_reach_the_bank() {
        // Role parsing is the only entry point for external identifiers.
        assert!(Role::parse("nonexistent").is_none());
    }

    #[test]
    fn every_role_has_all_four_categories_covered() {
        let bank = QuestionBank::standard();
        for role in Role::ordered() {
            assert!(!bank.questions(role, RoundKind::Behavioral).is_empty());
            assert!(!bank.questions(role, RoundKind::Technical).is_empty());
            assert!(!bank.questions(role, RoundKind::SystemDesign).is_empty());
            assert_eq!(bank.coding_problems(role).len(), 2);
        }
    }

    #[test]
    fn category_filter_keeps_dataset_order() {
        let bank = QuestionBank::standard();
        let first = bank.questions(Role::Ai, RoundKind::Technical);
        let second = bank.questions(Role::Ai, RoundKind::Technical);
        assert_eq!(first, second);
        assert!(first[0].prompt.contains("bagging"));
    }

    #[test]
    fn coding_round_category_yields_no_free_text_questions() {
        let bank = QuestionBank::standard();
        assert!(bank.questions(Role::Fullstack, RoundKind::Coding).is_empty());
    }

    #[test]
    fn coding_problems_declare_matching_case_counts() {
        let bank = QuestionBank::standard();
        for role in Role::ordered() {
            for problem in bank.coding_problems(role) {
                assert_eq!(problem.inputs.len(), problem.expected_outputs.len());
                assert!(!problem.languages.is_empty());
            }
        }
    }
}
