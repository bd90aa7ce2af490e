use crate::model::AnalysisRequest;

/// Queries used to find the entities a person is associated with
pub fn initial_queries(request: &AnalysisRequest) -> Vec<String> {
    vec![
        format!("{} {}", request.name, request.company),
        format!(
            "Who is {} and what companies has he worked for?",
            request.name
        ),
    ]
}

/// News queries issued for every discovered entity
pub fn follow_up_queries(entity: &str) -> Vec<String> {
    vec![
        format!("Latest news about {}", entity),
        format!("Fraud allegations against {}", entity),
        format!("any recent developments regarding {}", entity),
        format!("any negative news about {}", entity),
    ]
}
