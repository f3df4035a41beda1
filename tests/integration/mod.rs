/// Integration test target covering server construction and tool flows
mod dashboard_flow;
