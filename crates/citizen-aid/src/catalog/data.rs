use super::domain::{EligibilityThresholds, Scheme, SchemeCategory};

fn documents(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

pub(super) fn standard_schemes() -> Vec<Scheme> {
    vec![
        Scheme {
            name: "Ehsaas Education Grant".to_string(),
            category: SchemeCategory::Education,
            description: "Provides monthly stipend for families with school-aged children"
                .to_string(),
            eligibility: EligibilityThresholds {
                max_monthly_income: Some(30_000),
                min_children: Some(2),
                ..EligibilityThresholds::default()
            },
            credit_check_required: false,
            benefits: "Monthly stipend of PKR 2,000 per child, school supplies, uniform allowance"
                .to_string(),
            application_process:
                "Online application through Ehsaas portal or visit local Ehsaas center".to_string(),
            helpline: "0800-26477".to_string(),
            website: "https://ehsaas.gov.pk".to_string(),
            required_documents: documents(&[
                "CNIC",
                "Children's birth certificates",
                "School enrollment proof",
                "Income certificate",
                "Bank account details",
            ]),
        },
        Scheme {
            name: "Prime Minister's Education Initiative".to_string(),
            category: SchemeCategory::Education,
            description: "Supports education expenses for eligible families".to_string(),
            eligibility: EligibilityThresholds {
                max_monthly_income: Some(40_000),
                min_children: Some(1),
                ..EligibilityThresholds::default()
            },
            credit_check_required: false,
            benefits:
                "Educational stipend, laptop/tablet for students, scholarship opportunities"
                    .to_string(),
            application_process: "Apply through PM Education Portal or district education office"
                .to_string(),
            helpline: "0800-12345".to_string(),
            website: "https://pm-education.gov.pk".to_string(),
            required_documents: documents(&[
                "CNIC",
                "Student ID",
                "Academic records",
                "Income certificate",
                "Family registration certificate",
            ]),
        },
        Scheme {
            name: "Benazir Income Support Programme (BISP)".to_string(),
            category: SchemeCategory::Education,
            description: "Cash transfer program for poor families".to_string(),
            eligibility: EligibilityThresholds {
                max_monthly_income: Some(25_000),
                min_family_size: Some(2),
                ..EligibilityThresholds::default()
            },
            credit_check_required: false,
            benefits: "Monthly cash transfer of PKR 2,000, health insurance, education stipend"
                .to_string(),
            application_process: "Registration at BISP center or online through BISP portal"
                .to_string(),
            helpline: "0800-26477".to_string(),
            website: "https://bisp.gov.pk".to_string(),
            required_documents: documents(&[
                "CNIC",
                "Family registration certificate",
                "Income certificate",
                "Bank account details",
                "Children's birth certificates",
            ]),
        },
        Scheme {
            name: "Naya Pakistan Housing Scheme".to_string(),
            category: SchemeCategory::Housing,
            description: "Provides low-cost housing loans".to_string(),
            eligibility: EligibilityThresholds {
                min_monthly_income: Some(25_000),
                max_monthly_income: Some(60_000),
                ..EligibilityThresholds::default()
            },
            credit_check_required: true,
            benefits: "Low-interest housing loan up to PKR 2.5 million, flexible payment terms"
                .to_string(),
            application_process:
                "Apply through Naya Pakistan Housing Portal or visit designated banks".to_string(),
            helpline: "0800-12345".to_string(),
            website: "https://nphda.gov.pk".to_string(),
            required_documents: documents(&[
                "CNIC",
                "Income certificate",
                "Bank statements",
                "Employment letter",
                "Credit report",
                "Property documents",
            ]),
        },
        Scheme {
            name: "Apna Ghar Scheme".to_string(),
            category: SchemeCategory::Housing,
            description: "Affordable housing for low-income families".to_string(),
            eligibility: EligibilityThresholds {
                min_monthly_income: Some(20_000),
                max_monthly_income: Some(50_000),
                ..EligibilityThresholds::default()
            },
            credit_check_required: false,
            benefits: "Subsidized housing units, low down payment, government guarantee"
                .to_string(),
            application_process: "Apply through Apna Ghar portal or visit local housing authority"
                .to_string(),
            helpline: "0800-98765".to_string(),
            website: "https://apnaghar.gov.pk".to_string(),
            required_documents: documents(&[
                "CNIC",
                "Income certificate",
                "Family registration certificate",
                "Bank account details",
                "Employment proof",
            ]),
        },
        Scheme {
            name: "Sehat Card Plus".to_string(),
            category: SchemeCategory::Healthcare,
            description: "Free healthcare coverage for eligible families".to_string(),
            eligibility: EligibilityThresholds {
                max_monthly_income: Some(50_000),
                ..EligibilityThresholds::default()
            },
            credit_check_required: false,
            benefits:
                "Free treatment at government hospitals, emergency care, specialist consultations"
                    .to_string(),
            application_process: "Apply at Sehat Card centers or through online portal"
                .to_string(),
            helpline: "0800-12345".to_string(),
            website: "https://sehatcard.gov.pk".to_string(),
            required_documents: documents(&[
                "CNIC",
                "Family registration certificate",
                "Income certificate",
                "Recent photograph",
            ]),
        },
        Scheme {
            name: "Ehsaas Health Insurance".to_string(),
            category: SchemeCategory::Healthcare,
            description: "Health insurance for poor families".to_string(),
            eligibility: EligibilityThresholds {
                max_monthly_income: Some(30_000),
                ..EligibilityThresholds::default()
            },
            credit_check_required: false,
            benefits: "Health insurance coverage, cashless treatment, medicine allowance"
                .to_string(),
            application_process: "Apply through Ehsaas portal or visit Ehsaas center".to_string(),
            helpline: "0800-26477".to_string(),
            website: "https://ehsaas.gov.pk".to_string(),
            required_documents: documents(&[
                "CNIC",
                "Income certificate",
                "Family registration certificate",
                "Bank account details",
            ]),
        },
        Scheme {
            name: "Ehsaas Emergency Cash".to_string(),
            category: SchemeCategory::Employment,
            description: "Emergency financial assistance".to_string(),
            eligibility: EligibilityThresholds {
                max_monthly_income: Some(20_000),
                ..EligibilityThresholds::default()
            },
            credit_check_required: false,
            benefits: "One-time cash assistance of PKR 12,000, immediate relief".to_string(),
            application_process: "Apply through Ehsaas emergency portal or SMS service"
                .to_string(),
            helpline: "0800-26477".to_string(),
            website: "https://ehsaas.gov.pk".to_string(),
            required_documents: documents(&[
                "CNIC",
                "Income certificate",
                "Emergency situation proof",
                "Bank account details",
            ]),
        },
        Scheme {
            name: "Kamyab Jawan Program".to_string(),
            category: SchemeCategory::Employment,
            description: "Youth entrepreneurship and skill development".to_string(),
            eligibility: EligibilityThresholds {
                min_age: Some(18),
                max_age: Some(35),
                ..EligibilityThresholds::default()
            },
            credit_check_required: false,
            benefits: "Business loans up to PKR 5 million, skill training, mentorship".to_string(),
            application_process: "Apply through Kamyab Jawan portal or visit youth centers"
                .to_string(),
            helpline: "0800-12345".to_string(),
            website: "https://kamyabjawan.gov.pk".to_string(),
            required_documents: documents(&[
                "CNIC",
                "Educational certificates",
                "Business plan",
                "Bank account details",
                "Character certificate",
            ]),
        },
    ]
}
