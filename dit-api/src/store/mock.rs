//! Embedded fallback collections used when export files are absent

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use dit_common::models::{
    Campaign, CampaignStatus, Category, Donation, DonorType, ImpactLocation, ImpactMetrics,
    Location,
};

use crate::models::{Donor, Notification, NotificationType, Priority, Testimonial};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn timestamp(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .unwrap_or_default()
}

fn location(country: &str, region: &str, coordinates: [f64; 2]) -> Location {
    Location {
        country: country.to_string(),
        region: region.to_string(),
        coordinates,
    }
}

pub fn donations() -> Vec<Donation> {
    vec![
        Donation {
            id: "don-001".to_string(),
            donor_id: Some("donor-001".to_string()),
            donor_name: "John Doe".to_string(),
            amount: 500.0,
            date: date(2024, 1, 15),
            campaign: "School Lunch Program".to_string(),
            location: location("United States", "North America", [-74.0060, 40.7128]),
            donor_type: DonorType::Individual,
            recurring: false,
            anonymous: false,
        },
        Donation {
            id: "don-002".to_string(),
            donor_id: Some("donor-002".to_string()),
            donor_name: "Jane Smith".to_string(),
            amount: 250.0,
            date: date(2024, 1, 14),
            campaign: "Digital Learning Initiative".to_string(),
            location: location("United Kingdom", "Europe", [-0.1278, 51.5074]),
            donor_type: DonorType::Individual,
            recurring: true,
            anonymous: false,
        },
    ]
}

pub fn campaigns() -> Vec<Campaign> {
    let metrics = |people_helped, projects_completed, resources_distributed| ImpactMetrics {
        people_helped,
        projects_completed,
        resources_distributed,
    };
    vec![
        Campaign {
            id: "camp-001".to_string(),
            name: "School Lunch Program".to_string(),
            description: "Providing nutritious meals to students in underserved schools.".to_string(),
            goal: 50_000.0,
            raised: 46_500.0,
            category: Category::Education,
            location: location("United States", "North America", [-74.0060, 40.7128]),
            start_date: date(2024, 1, 1),
            end_date: date(2024, 12, 31),
            status: CampaignStatus::Completed,
            beneficiaries: 1200,
            impact_metrics: metrics(1200, 8, 15_640),
        },
        Campaign {
            id: "camp-002".to_string(),
            name: "Digital Learning Initiative".to_string(),
            description: "Bringing laptops and connectivity to rural classrooms.".to_string(),
            goal: 30_000.0,
            raised: 12_000.0,
            category: Category::Education,
            location: location("United Kingdom", "Europe", [-0.1278, 51.5074]),
            start_date: date(2024, 1, 1),
            end_date: date(2024, 12, 31),
            status: CampaignStatus::Active,
            beneficiaries: 890,
            impact_metrics: metrics(890, 4, 4_820),
        },
    ]
}

pub fn impact_locations() -> Vec<ImpactLocation> {
    vec![
        ImpactLocation {
            id: "loc-001".to_string(),
            name: "North America".to_string(),
            coordinates: [-74.0060, 40.7128],
            total_donations: 78_000.0,
            active_campaigns: 1,
            beneficiaries: 1200,
            impact_score: 100,
        },
        ImpactLocation {
            id: "loc-002".to_string(),
            name: "Europe".to_string(),
            coordinates: [-0.1278, 51.5074],
            total_donations: 52_000.0,
            active_campaigns: 1,
            beneficiaries: 890,
            impact_score: 100,
        },
    ]
}

pub fn donors() -> Vec<Donor> {
    let donor = |id: &str, name: &str, email: &str, total: f64, count: u64, campaigns: &[&str], joined: NaiveDate| Donor {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        total_donated: total,
        donation_count: count,
        preferred_campaigns: campaigns.iter().map(|c| c.to_string()).collect(),
        join_date: joined,
    };
    vec![
        donor("donor-001", "John Doe", "john.doe@email.com", 2500.0, 8,
            &["School Lunch Program", "Digital Learning Initiative"], date(2023, 3, 15)),
        donor("donor-002", "Jane Smith", "jane.smith@email.com", 1800.0, 6,
            &["Scholarship Fund", "Library Books Drive"], date(2023, 5, 22)),
        donor("donor-003", "Education Foundation", "contact@educfoundation.org", 15_000.0, 25,
            &["School Lunch Program", "Scholarship Fund", "Digital Learning Initiative"], date(2022, 9, 10)),
        donor("donor-004", "Tech for Good", "donate@techforgood.org", 8500.0, 15,
            &["Digital Learning Initiative", "Library Books Drive"], date(2023, 1, 8)),
        donor("donor-005", "Global Impact Corp", "csr@globalimpact.com", 12_000.0, 20,
            &["School Lunch Program", "Scholarship Fund"], date(2022, 11, 20)),
        donor("donor-006", "Learning Together NGO", "info@learningtogether.org", 5500.0, 12,
            &["Scholarship Fund", "Digital Learning Initiative"], date(2023, 7, 14)),
    ]
}

pub fn notifications() -> Vec<Notification> {
    vec![
        Notification {
            id: "notif-001".to_string(),
            donor_id: "donor-001".to_string(),
            notification_type: NotificationType::DonationReceived,
            title: "Thank you for your donation!".to_string(),
            message: "We received your $500 donation to the School Lunch Program. \
                      Your generosity is making a real difference!"
                .to_string(),
            donation_id: Some("don-001".to_string()),
            impact_metric_id: None,
            date: timestamp(2024, 1, 15, 10, 30),
            read: false,
            priority: Priority::High,
        },
        Notification {
            id: "notif-002".to_string(),
            donor_id: "donor-001".to_string(),
            notification_type: NotificationType::ImpactUpdate,
            title: "Your donation is making an impact!".to_string(),
            message: "Your contribution helped serve 150 nutritious meals to elementary \
                      school students in North America."
                .to_string(),
            donation_id: Some("don-001".to_string()),
            impact_metric_id: Some("imp-001".to_string()),
            date: timestamp(2024, 1, 16, 14, 20),
            read: true,
            priority: Priority::Medium,
        },
    ]
}

pub fn testimonials() -> Vec<Testimonial> {
    let testimonial = |id: &str, name: &str, role: &str, campaign: &str, region: &str, message: &str, on: NaiveDate, impact_type: &str| Testimonial {
        id: id.to_string(),
        beneficiary_name: name.to_string(),
        role: role.to_string(),
        campaign: campaign.to_string(),
        region: region.to_string(),
        message: message.to_string(),
        date: on,
        impact_type: impact_type.to_string(),
        rating: 5,
        verified: true,
    };
    vec![
        testimonial("test-001", "Maria Rodriguez", "Student", "School Lunch Program", "South America",
            "Thanks to the school lunch program, I can focus on my studies without worrying about hunger.",
            date(2024, 1, 20), "meals_served"),
        testimonial("test-002", "Ahmed Hassan", "Teacher", "Digital Learning Initiative", "Africa",
            "The tablets and digital resources have transformed our classroom.",
            date(2024, 1, 18), "books_distributed"),
        testimonial("test-003", "Li Wei", "Scholarship Recipient", "Scholarship Fund", "Asia",
            "Receiving this scholarship changed my life.",
            date(2024, 1, 15), "scholarships_provided"),
    ]
}
