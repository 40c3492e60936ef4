use edge::testing::ScriptedInvoker;
use serde_json::{json, Value};
use services::domains::admin::PlatformInsights;
use services::domains::challenge::ChallengeSubmission;
use services::domains::clinical::{PatientCriteria, TrialDesign};
use services::domains::community::ModerationResult;
use services::domains::innovation::InnovationInput;
use services::domains::investment::StartupProfile;
use services::domains::policy::{
    PolicyBrief, PolicyImpactResult, PolicyInput, Vision2030AlignmentResult,
};
use services::domains::quotation::QuoteRequest;
use services::domains::regulatory::DeviceProfile;
use services::domains::PolicyService;
use services::{Fallback, ServiceContext, ServiceRegistry, ServiceSettings, ServiceType};
use std::sync::Arc;

fn failing_context(message: &str) -> (ServiceContext, Arc<ScriptedInvoker>) {
    let invoker = Arc::new(ScriptedInvoker::always_failing(message));
    let ctx = ServiceContext::new(invoker.clone(), ServiceSettings::default());
    (ctx, invoker)
}

fn assert_fallback<T: Fallback + serde::Serialize>(value: &T, message: &str) {
    assert_eq!(value.error(), Some(message));
    let json = serde_json::to_value(value).unwrap();
    assert_eq!(json["error"], message);
}

#[tokio::test]
async fn test_policy_impact_fallback_matches_documented_shape() {
    let (ctx, _) = failing_context("network down");
    let policy = ctx.policy().unwrap();

    let result = policy
        .simulate_impact(&PolicyInput::new("X", "Y", "healthcare"), json!({}))
        .await;

    assert_eq!(result, PolicyImpactResult::fallback("network down"));
    let value = serde_json::to_value(&result).unwrap();
    assert_eq!(value["impactScore"], json!(0.0));
    assert_eq!(value["stakeholderImpact"], json!({}));
    assert_eq!(value["economicImpact"], "Unable to analyze due to an error.");
    assert_eq!(value["error"], "network down");
}

#[tokio::test]
async fn test_registered_policy_stub_times_out_to_fallback() {
    let invoker = Arc::new(ScriptedInvoker::new());
    invoker.fail("policy-vision-alignment", "timeout");
    let ctx = ServiceContext::new(invoker.clone(), ServiceSettings::default());

    let registry = ServiceRegistry::new();
    registry.register(ServiceType::Policy, Arc::new(PolicyService::new(&ctx.deps())));
    let policy = registry.get_as::<PolicyService>(ServiceType::Policy).unwrap();

    let input = PolicyInput::new("X", "Y", "healthcare");
    let result = policy.analyze_vision2030_alignment(&input).await;

    assert_eq!(result, Vision2030AlignmentResult::fallback("timeout"));
    assert_eq!(result.error.as_deref(), Some("timeout"));
    assert_eq!(result.summary, "Unable to analyze alignment due to an error.");

    let call = invoker.last_call().unwrap();
    assert_eq!(call.function, "policy-vision-alignment");
    assert_eq!(call.body["policy"]["name"], "X");
    assert_eq!(call.body["policy"]["sector"], "healthcare");
}

#[tokio::test]
async fn test_every_facade_resolves_on_failure() {
    let (ctx, invoker) = failing_context("boom");
    let none: Vec<String> = Vec::new();

    let policy = ctx.policy().unwrap();
    let input = PolicyInput::new("X", "Y", "healthcare");
    assert_fallback(&policy.analyze_vision2030_alignment(&input).await, "boom");
    assert_fallback(&policy.simulate_impact(&input, Value::Null).await, "boom");
    assert_fallback(&policy.generate_policy_brief(&input, "ministry").await, "boom");

    let investment = ctx.investment().unwrap();
    let startup = StartupProfile::default();
    let analysis = investment.analyze_startup(&startup).await;
    assert_fallback(&analysis, "boom");
    assert_eq!(analysis.risk_level, "Unknown");
    assert_fallback(&investment.match_investors(&startup, 5).await, "boom");

    let innovation = ctx.innovation().unwrap();
    let item = InnovationInput::default();
    assert_fallback(&innovation.assess_innovation(&item).await, "boom");
    assert_fallback(&innovation.find_similar_innovations(&item, 3).await, "boom");

    let regulatory = ctx.regulatory().unwrap();
    let pathway = regulatory
        .check_compliance_pathway(&DeviceProfile::default())
        .await;
    assert_fallback(&pathway, "boom");
    assert_eq!(pathway.pathway, "Unknown");
    assert!(pathway.steps.is_empty());
    assert_fallback(&regulatory.summarize_regulation("text").await, "boom");

    let challenge = ctx.challenge().unwrap();
    assert_fallback(
        &challenge
            .evaluate_submission(&ChallengeSubmission::default())
            .await,
        "boom",
    );
    assert_fallback(&challenge.suggest_challenges(&none).await, "boom");

    let support = ctx.support().unwrap();
    assert_fallback(&support.answer_question("how?", &none).await, "boom");
    let ticket = support.classify_ticket("login", "cannot sign in").await;
    assert_fallback(&ticket, "boom");
    assert_eq!(ticket.priority, "Unknown");

    let clinical = ctx.clinical().unwrap();
    assert_fallback(
        &clinical
            .analyze_trial_design(&TrialDesign::default())
            .await,
        "boom",
    );
    let matches = clinical
        .match_trials(&PatientCriteria::default())
        .await;
    assert_fallback(&matches, "boom");
    assert!(matches.trials.is_empty());

    let events = ctx.events().unwrap();
    assert_fallback(&events.recommend_events("u-1", &none).await, "boom");
    assert_fallback(&events.summarize_event("e-1", "notes").await, "boom");

    let admin = ctx.admin().unwrap();
    let insights = admin.generate_insights("30d").await;
    assert_fallback(&insights, "boom");
    assert_eq!(insights, PlatformInsights::fallback("boom"));
    assert_fallback(&admin.detect_anomalies(json!({"signups": [1, 2]})).await, "boom");

    let compliance = ctx.compliance().unwrap();
    assert_fallback(&compliance.assess_compliance("org-1", "ISO 13485").await, "boom");
    assert_fallback(&compliance.generate_checklist("ISO 13485").await, "boom");

    let community = ctx.community().unwrap();
    let moderation = community.moderate_content("hello").await;
    assert_eq!(moderation, ModerationResult::fallback("boom"));
    assert!(!moderation.approved);
    assert_fallback(&community.suggest_connections("u-1").await, "boom");

    let knowledge = ctx.knowledge().unwrap();
    assert_fallback(&knowledge.semantic_search("diabetes", 10).await, "boom");
    assert_fallback(&knowledge.summarize_document("doc-1").await, "boom");

    let quotation = ctx.quotation().unwrap();
    let quote = quotation
        .generate_quote(&QuoteRequest::default())
        .await;
    assert_fallback(&quote, "boom");
    assert_eq!(quote.total, 0.0);
    assert_fallback(&quotation.compare_quotes(&[quote.clone()]).await, "boom");

    let recommendation = ctx.recommendation().unwrap();
    assert_fallback(
        &recommendation
            .personalized_recommendations("u-1", &none, 5)
            .await,
        "boom",
    );

    assert_eq!(invoker.calls().len(), 28);
    let stats = ctx.tracer().stats();
    assert_eq!(stats.recorded, 28);
    assert_eq!(stats.failures, 28);
}

#[tokio::test]
async fn test_successful_call_passes_payload_through() {
    let invoker = Arc::new(ScriptedInvoker::new());
    invoker.respond_ok(
        "investment-analysis",
        json!({"investmentScore": 82, "riskLevel": "Medium", "strengths": ["team"]}),
    );
    let ctx = ServiceContext::new(invoker, ServiceSettings::default());

    let analysis = ctx
        .investment()
        .unwrap()
        .analyze_startup(&StartupProfile::default())
        .await;

    assert_eq!(analysis.investment_score, 82.0);
    assert_eq!(analysis.risk_level, "Medium");
    assert_eq!(analysis.strengths, vec!["team".to_string()]);
    assert_eq!(analysis.market_potential, "");
    assert!(analysis.error.is_none());
    assert!(ctx.tracer().get_recent_traces(1)[0].success);
}

#[tokio::test]
async fn test_plain_text_answer_is_salvaged() {
    let invoker = Arc::new(ScriptedInvoker::new());
    invoker.respond_ok(
        "support-ticket-classifier",
        json!("category: \"billing\"... \"priority\": \"High\", \"confidence\": 0.7"),
    );
    let ctx = ServiceContext::new(invoker, ServiceSettings::default());

    let ticket = ctx
        .support()
        .unwrap()
        .classify_ticket("invoice", "charged twice")
        .await;

    assert_eq!(ticket.priority, "High");
    assert_eq!(ticket.confidence, 0.7);
    assert!(ticket.error.is_none());
}

#[tokio::test]
async fn test_unparseable_model_text_is_a_failure() {
    let invoker = Arc::new(ScriptedInvoker::new());
    invoker.respond_ok(
        "policy-impact-simulation",
        json!("Sorry, the model is overloaded."),
    );
    invoker.respond_ok("policy-brief", json!("Internal server error"));
    invoker.respond_ok("policy-vision-alignment", json!([]));
    let ctx = ServiceContext::new(invoker, ServiceSettings::default());
    let policy = ctx.policy().unwrap();
    let input = PolicyInput::new("X", "Y", "healthcare");

    let impact = policy.simulate_impact(&input, json!({})).await;
    assert!(impact.error.is_some());
    assert_eq!(impact.economic_impact, "Unable to analyze due to an error.");

    let brief = policy.generate_policy_brief(&input, "ministry").await;
    assert!(brief.error.is_some());
    assert_eq!(
        brief.executive_summary,
        PolicyBrief::fallback("x").executive_summary
    );

    let alignment = policy.analyze_vision2030_alignment(&input).await;
    assert!(alignment
        .error
        .unwrap()
        .starts_with("Invalid response from policy-vision-alignment"));

    let stats = ctx.tracer().stats();
    assert_eq!(stats.recorded, 3);
    assert_eq!(stats.failures, 3);
}
