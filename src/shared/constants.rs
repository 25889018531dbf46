// =============================================================================
// LEAD-TIME THRESHOLDS
// =============================================================================

/// Lead times strictly above this many days are KPI breaches requiring escalation
pub const KPI_BREACH_THRESHOLD_DAYS: i64 = 30;

/// Informal receiving target used for colour-coding only, never a validation gate
pub const RECEIVING_DISPLAY_TARGET_DAYS: i64 = 5;

/// Informal forwarding target used for colour-coding only, never a validation gate
pub const FORWARDING_DISPLAY_TARGET_DAYS: i64 = 3;

// =============================================================================
// REJECTION REASONS
// =============================================================================

/// Catch-all rejection choice; must be accompanied by free text
pub const OTHER_REJECTION_REASON: &str = "Other";

/// Canonical Form 60 rejection reasons used by the registry
pub const DEFAULT_REJECTION_REASONS: &[&str] = &[
    "No Stamp or Seal/Note Dated",
    "Conflicting Case Number between the E Citizen Print Receipt and the Form 60 Notice",
    "Lack of Deputy and or District Registrars' Signature and Name",
    "Prepare a corrigenda",
    "Proof of gazette fees payment not attached NO receipt attached",
    "No Case Number on Form 60 and/or Government Printer Receipt",
    "Lack of Petitioner(s) name and or deceased name in the Form 60 Notice",
    "Attach original bankslip and not a photocopy unless paid via ECitizen platform",
    "Same deceased details in two different case numbers within submitted Notices from the Station",
    "Not indicating whether the matter is testate or intestate",
    "Same case number with two different petitioners and or deceased names",
    "Deputy registrar and or District Registrar name not typed",
    "Receipt mismatch/wrong receipt",
    "Bankers' cheques be addressed to Government Printers and not Kenya Gazette",
    "Altered Form 60 Notice",
    "One deceased per petition",
    "Different Court Stations in one Form 60 notice",
    "Form 60 Notice missing the date of Death of the Deceased Persons",
    "Rejected from the Govt. Printers due to being sent directly to their offices",
    "Attach the original Form 60 notice NOT a copy",
    "Form 60 notice without a receipt",
    "Duplicate/Photocopy of Form 60",
    "FORM 60 missing",
    "Two Deceased in one Form 60",
    "Kindly confirm the deceased name",
];

// =============================================================================
// AUDIT LABELS
// =============================================================================

pub const EDIT_ACTION_CREATED: &str = "Created record";
pub const EDIT_ACTION_UPDATED: &str = "Updated record";
pub const EDIT_ACTION_FORWARDED: &str = "Forwarded to Government Printer";
pub const EDIT_ACTION_PUBLISHED: &str = "Published in Kenya Gazette";
pub const EDIT_ACTION_KPI_ALERT: &str = "KPI alert sent";
