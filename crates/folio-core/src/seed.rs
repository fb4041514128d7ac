//! Sample catalog content shown on a fresh install.

use chrono::{TimeZone, Utc};

use crate::{
  Error, Result,
  experience::{
    Achievement, CostMetric, CoverageMetric, Experience, Metrics, NewExperience,
    ProductivityMetric, ReliabilityMetric, TimeMetric,
  },
  service::{Deliverable, PricingInfo, PricingKind, Service, ServiceCategory},
  technology::{Level, Technology},
};

/// Everything a catalog backend needs to start non-empty.
#[derive(Debug, Clone)]
pub struct Catalog {
  pub technologies: Vec<Technology>,
  pub experiences:  Vec<Experience>,
  pub services:     Vec<Service>,
}

pub fn catalog() -> Result<Catalog> {
  Ok(Catalog { technologies: technologies()?, experiences: experiences()?, services: services()? })
}

fn date(y: i32, m: u32, d: u32) -> Result<chrono::DateTime<Utc>> {
  Utc
    .with_ymd_and_hms(y, m, d, 0, 0, 0)
    .single()
    .ok_or_else(|| Error::internal(format!("invalid seed date {y}-{m}-{d}")))
}

fn technologies() -> Result<Vec<Technology>> {
  let rows = [
    ("Go", "Backend", Level::Expert, "Services, tooling and concurrent systems"),
    ("Rust", "Backend", Level::Advanced, "Safe systems programming"),
    ("PostgreSQL", "Database", Level::Expert, "Relational modelling and tuning"),
    ("Kubernetes", "Infrastructure", Level::Advanced, "Container orchestration"),
    ("Solidity", "Blockchain", Level::Intermediate, "Smart contract development"),
    ("TypeScript", "Frontend", Level::Advanced, "Typed web applications"),
  ];
  rows
    .into_iter()
    .enumerate()
    .map(|(i, (name, category, level, description))| {
      let mut tech = Technology::new(format!("tech-{:03}", i + 1), name, category, level)?;
      tech.set_description(description);
      Ok(tech)
    })
    .collect()
}

fn experiences() -> Result<Vec<Experience>> {
  let mut fireblocks = Experience::new("fireblocks-001", NewExperience {
    company_name: "Fireblocks".into(),
    position:     "Senior Software Engineer".into(),
    description:  "Led development of digital asset custody solutions for institutional clients"
      .into(),
    location:     "Tel Aviv, Israel".into(),
    start_date:   date(2021, 6, 1)?,
    is_remote:    true,
  })?;
  fireblocks.set_end_date(date(2023, 12, 31)?)?;
  fireblocks.add_achievement(
    Achievement::new(
      "achievement-001",
      "Improved Test Coverage by 25%",
      "Implemented comprehensive test automation strategy across critical financial systems",
    )
    .with_impact("Reduced production incidents by 60% and improved deployment confidence")
    .with_metrics(Metrics { test_coverage: Some(CoverageMetric::new(70.0, 95.0)), ..Default::default() }),
  );
  fireblocks.add_achievement(
    Achievement::new(
      "achievement-002",
      "Reduced Deployment Time by 87%",
      "Automated CI/CD pipeline with zero-downtime deployments and comprehensive testing",
    )
    .with_impact("Enabled daily deployments and faster time-to-market for critical features")
    .with_metrics(Metrics { deployment_time: Some(TimeMetric::new(120, 15)), ..Default::default() }),
  );
  fireblocks.add_achievement(
    Achievement::new(
      "achievement-003",
      "Achieved 99.9% System Uptime",
      "Implemented robust monitoring, alerting, and automated failover mechanisms",
    )
    .with_impact("Met enterprise SLA requirements and eliminated manual intervention incidents")
    .with_metrics(Metrics {
      system_reliability: Some(ReliabilityMetric::new(99.9, 720, 5, 2)),
      ..Default::default()
    }),
  );
  fireblocks.add_achievement(
    Achievement::new(
      "achievement-004",
      "Increased Team Productivity by 40%",
      "Streamlined development processes and introduced modern DevOps practices",
    )
    .with_impact("Reduced lead time and improved team velocity while maintaining quality")
    .with_metrics(Metrics {
      productivity: Some(ProductivityMetric::new(12, 48, 24, 40.0)),
      ..Default::default()
    }),
  );
  fireblocks.add_achievement(
    Achievement::new(
      "achievement-005",
      "Generated $2.4M Annual Cost Savings",
      "Optimized infrastructure costs and eliminated operational inefficiencies",
    )
    .with_impact("Achieved 300% ROI through automation and process improvements")
    .with_metrics(Metrics {
      cost_savings: Some(CostMetric::new(200_000.0, 2_400_000.0, 300.0, 4)),
      ..Default::default()
    }),
  );

  let mut consulting = Experience::new("consulting-001", NewExperience {
    company_name: "Independent Consultant".into(),
    position:     "Senior Software Engineer & Technical Consultant".into(),
    description:  "Providing specialized expertise in digital asset infrastructure and secure \
                   financial systems"
      .into(),
    location:     "Remote".into(),
    start_date:   date(2024, 1, 1)?,
    is_remote:    true,
  })?;
  consulting.add_achievement(
    Achievement::new(
      "achievement-006",
      "Accelerated Client Deployment by 75%",
      "Implemented standardized development practices and automated testing frameworks",
    )
    .with_impact(
      "Enabled faster time-to-market and reduced technical risk for financial product launches",
    )
    .with_metrics(Metrics {
      deployment_time: Some(TimeMetric::new(480, 120)),
      test_coverage: Some(CoverageMetric::new(60.0, 85.0)),
      productivity: Some(ProductivityMetric::new(8, 72, 36, 35.0)),
      ..Default::default()
    }),
  );

  let mut banking = Experience::new("banking-001", NewExperience {
    company_name: "Major European Bank".into(),
    position:     "Software Engineer".into(),
    description:  "Developed and maintained critical banking infrastructure and customer-facing \
                   applications"
      .into(),
    location:     "Frankfurt, Germany".into(),
    start_date:   date(2018, 3, 1)?,
    is_remote:    false,
  })?;
  banking.set_end_date(date(2021, 5, 31)?)?;
  banking.add_achievement(
    Achievement::new(
      "achievement-007",
      "Modernized Legacy Systems with 50% Performance Gain",
      "Refactored critical payment processing systems to improve reliability and performance",
    )
    .with_impact("Reduced transaction processing time and improved customer experience")
    .with_metrics(Metrics {
      system_reliability: Some(ReliabilityMetric::new(99.5, 480, 15, 5)),
      cost_savings: Some(CostMetric::new(150_000.0, 1_800_000.0, 250.0, 6)),
      ..Default::default()
    }),
  );

  Ok(vec![fireblocks, consulting, banking])
}

fn services() -> Result<Vec<Service>> {
  let mut audit = Service::new(
    "service-001",
    "Architecture Review",
    "In-depth review of system architecture with a prioritised remediation plan",
    ServiceCategory::Architecture,
  )?;
  audit.set_duration("2-3 weeks");
  audit.set_pricing(PricingInfo {
    kind:        PricingKind::Project,
    amount:      12_000.0,
    currency:    Some("EUR".into()),
    description: Some("Fixed price".into()),
  })?;
  audit.add_deliverable(Deliverable {
    id:          "deliverable-001".into(),
    name:        "Review report".into(),
    description: "Findings, risks and recommendations".into(),
    timeline:    Some("End of engagement".into()),
  });

  let mut consulting = Service::new(
    "service-002",
    "Technical Consulting",
    "Hands-on guidance for teams building secure financial and digital asset systems",
    ServiceCategory::Consulting,
  )?;
  consulting.set_pricing(PricingInfo {
    kind:        PricingKind::Daily,
    amount:      1_200.0,
    currency:    Some("EUR".into()),
    description: None,
  })?;

  let mut mentoring = Service::new(
    "service-003",
    "Engineering Mentoring",
    "Regular sessions for senior engineers moving into technical leadership",
    ServiceCategory::Mentoring,
  )?;
  mentoring.set_pricing(PricingInfo {
    kind:        PricingKind::Retainer,
    amount:      2_000.0,
    currency:    Some("EUR".into()),
    description: Some("Monthly".into()),
  })?;
  mentoring.deactivate();

  Ok(vec![audit, consulting, mentoring])
}
