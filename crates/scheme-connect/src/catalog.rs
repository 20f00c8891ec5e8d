//! Static catalog of the ten supported scholarship schemes.
//!
//! Records are compiled in and never mutated at runtime; the `"ALL"`
//! sentinel on `state`/`category` means the dimension is unrestricted.

use serde::Serialize;

/// Sentinel meaning "no restriction on this dimension".
pub const ALL: &str = "ALL";

/// One scholarship scheme with its eligibility bounds and benefit details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemeRecord {
    pub id: &'static str,
    pub name: &'static str,
    pub state: &'static str,
    pub category: &'static str,
    pub income_max: u64,
    pub age_min: u32,
    pub age_max: u32,
    pub benefits: &'static str,
    pub documents: &'static [&'static str],
    pub apply_link: &'static str,
}

static SCHEMES: [SchemeRecord; 10] = [
    SchemeRecord {
        id: "scheme_1",
        name: "National Scholarship for Higher Education",
        state: ALL,
        category: ALL,
        income_max: 250_000,
        age_min: 17,
        age_max: 25,
        benefits: "Full tuition fee reimbursement up to ₹50,000 per year plus ₹10,000 annual book allowance for undergraduate students.",
        documents: &[
            "Aadhaar Card",
            "Income Certificate",
            "Previous Year Marksheet",
            "Bank Passbook",
            "College Admission Letter",
        ],
        apply_link: "https://scholarships.gov.in",
    },
    SchemeRecord {
        id: "scheme_2",
        name: "PM YASASVI Scholarship",
        state: ALL,
        category: "OBC",
        income_max: 250_000,
        age_min: 15,
        age_max: 25,
        benefits: "Annual scholarship of ₹75,000 for Class 9-10 students and ₹1,25,000 for Class 11-12 students from OBC, EBC, and DNT categories.",
        documents: &[
            "Caste Certificate",
            "Income Certificate",
            "Aadhaar Card",
            "School Bonafide",
            "Parent ID Proof",
        ],
        apply_link: "https://yet.nta.ac.in",
    },
    SchemeRecord {
        id: "scheme_3",
        name: "Post Matric Scholarship for SC Students",
        state: ALL,
        category: "SC",
        income_max: 300_000,
        age_min: 15,
        age_max: 35,
        benefits: "Complete tuition and examination fees covered, plus monthly maintenance allowance of ₹550-1200 based on course level.",
        documents: &[
            "Caste Certificate",
            "Income Certificate",
            "Previous Marksheet",
            "Aadhaar Card",
            "Bank Account Details",
        ],
        apply_link: "https://scholarships.gov.in",
    },
    SchemeRecord {
        id: "scheme_4",
        name: "Maharashtra State Merit Scholarship",
        state: "Maharashtra",
        category: ALL,
        income_max: 800_000,
        age_min: 16,
        age_max: 25,
        benefits: "Merit-based scholarship of ₹5,000-25,000 per year for students scoring above 75% in board exams.",
        documents: &[
            "Domicile Certificate",
            "Marksheet",
            "Income Certificate",
            "Aadhaar Card",
        ],
        apply_link: "https://mahadbt.maharashtra.gov.in",
    },
    SchemeRecord {
        id: "scheme_5",
        name: "Karnataka Vidyasiri Scholarship",
        state: "Karnataka",
        category: ALL,
        income_max: 200_000,
        age_min: 17,
        age_max: 25,
        benefits: "Annual scholarship ranging from ₹11,000 to ₹50,000 based on course for students from economically weaker sections.",
        documents: &[
            "Income Certificate",
            "Caste Certificate",
            "Aadhaar Card",
            "College ID",
            "Fee Receipt",
        ],
        apply_link: "https://karepass.karnataka.gov.in",
    },
    SchemeRecord {
        id: "scheme_6",
        name: "Central Sector Scholarship for College Students",
        state: ALL,
        category: ALL,
        income_max: 450_000,
        age_min: 17,
        age_max: 25,
        benefits: "₹12,000 per annum for graduation (first 3 years), ₹20,000 for post-graduation. Top 20 percentile of 12th board students.",
        documents: &[
            "12th Marksheet",
            "Income Certificate",
            "Aadhaar Card",
            "Bank Details",
            "College Admission Proof",
        ],
        apply_link: "https://scholarships.gov.in",
    },
    SchemeRecord {
        id: "scheme_7",
        name: "Pragati Scholarship for Girl Students",
        state: ALL,
        category: ALL,
        income_max: 800_000,
        age_min: 17,
        age_max: 30,
        benefits: "₹50,000 per year for girl students pursuing technical education. Only 2 girls per family eligible.",
        documents: &[
            "Aadhaar Card",
            "Income Certificate",
            "Previous Marksheet",
            "Bank Account",
            "Institute Bonafide",
        ],
        apply_link: "https://aicte-pragati-saksham-gov.in",
    },
    SchemeRecord {
        id: "scheme_8",
        name: "UP Scholarship for Minority Students",
        state: "Uttar Pradesh",
        category: "Minority",
        income_max: 200_000,
        age_min: 14,
        age_max: 30,
        benefits: "Full fee reimbursement for minority community students including Muslims, Christians, Sikhs, Buddhists, and Parsis.",
        documents: &[
            "Minority Certificate",
            "Income Certificate",
            "Aadhaar",
            "Previous Marksheet",
            "Bank Passbook",
        ],
        apply_link: "https://scholarship.up.gov.in",
    },
    SchemeRecord {
        id: "scheme_9",
        name: "Pre Matric Scholarship for ST Students",
        state: ALL,
        category: "ST",
        income_max: 200_000,
        age_min: 10,
        age_max: 18,
        benefits: "Monthly stipend of ₹150-350 for day scholars and ₹500-750 for hostellers studying in Class 9-10.",
        documents: &[
            "Tribe Certificate",
            "Income Certificate",
            "School ID",
            "Aadhaar Card",
            "Parent Bank Account",
        ],
        apply_link: "https://scholarships.gov.in",
    },
    SchemeRecord {
        id: "scheme_10",
        name: "Tamil Nadu Free Education Scheme",
        state: "Tamil Nadu",
        category: ALL,
        income_max: 500_000,
        age_min: 6,
        age_max: 25,
        benefits: "Complete fee waiver in government schools and colleges plus free textbooks, uniforms, and mid-day meals.",
        documents: &[
            "Community Certificate",
            "Income Certificate",
            "Aadhaar Card",
            "School Bonafide",
        ],
        apply_link: "https://tnscholarships.gov.in",
    },
];

/// All schemes in catalog order.
pub fn all_schemes() -> &'static [SchemeRecord] {
    &SCHEMES
}

/// Linear id lookup; the catalog is small enough that nothing fancier pays off.
pub fn find_scheme(id: &str) -> Option<&'static SchemeRecord> {
    SCHEMES.iter().find(|scheme| scheme.id == id)
}
