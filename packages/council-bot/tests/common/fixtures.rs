//! Council page fixtures.

use council_bot_core::kernel::test_dependencies::MockHttpFetcher;

pub const COUNCIL_URL: &str = "https://council.example.govt.nz/";

pub const PFS_AGENDA: &str =
    "https://council.example.govt.nz/Open/2025/03/PFS_20250311_AGN_4067_AT.PDF";
pub const CC_AGENDA: &str =
    "https://council.example.govt.nz/Open/2025/03/CC_20250318_AGN_4070_AT.PDF";

/// Agenda grid with two meetings. Each row also carries a supplementary
/// agenda and minutes, neither of which should be picked up.
pub const COUNCIL_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>Meetings, Agendas and Minutes</title></head>
<body>
<table class="bpsGrid">
  <tr>
    <th>Date</th><th>Meeting</th><th>Agenda</th><th>Attachments</th><th>Minutes</th>
  </tr>
  <tr>
    <td class="bpsGridDate">11 Mar 2025</td>
    <td class="bpsGridCommittee">Policy, Finance and Strategy Committee<br><span class="bpsGridCommitteeLocation">Council Chambers, 2 Myrtle Street, Lower Hutt</span> 2:00 pm</td>
    <td class="bpsGridAgenda"><a href="Open/2025/03/PFS_20250311_AGN_4067_AT.PDF"><img src="pdf.gif" alt="Agenda"></a></td>
    <td class="bpsGridAttachments"><a href="Open/2025/03/PFS_20250311_AGN_4067_AT_SUP.PDF">Supplementary</a></td>
    <td class="bpsGridMinutes"><a href="Open/2025/03/PFS_20250311_MIN_4067.PDF">Minutes</a></td>
  </tr>
  <tr>
    <td class="bpsGridDate">18 Mar 2025</td>
    <td class="bpsGridCommittee">Hutt City Council<br><span class="bpsGridCommitteeLocation">Council Chambers</span> 3:00 pm</td>
    <td class="bpsGridAgenda"><a href="/Open/2025/03/CC_20250318_AGN_4070_AT.PDF"><img src="pdf.gif" alt="Agenda"></a></td>
    <td class="bpsGridAttachments"></td>
    <td class="bpsGridMinutes"></td>
  </tr>
</table>
</body>
</html>"#;

/// A plausible PDF body, comfortably over the suspect-size threshold.
pub fn agenda_pdf() -> Vec<u8> {
    let mut bytes = b"%PDF-1.7\n1 0 obj\n<< /Type /Catalog >>\nendobj\n".to_vec();
    bytes.resize(4096, b'\n');
    bytes
}

/// Fetcher serving the council page and both agenda documents.
pub fn council_fetcher() -> MockHttpFetcher {
    MockHttpFetcher::new()
        .with_page(COUNCIL_URL, COUNCIL_PAGE)
        .with_document(PFS_AGENDA, &agenda_pdf())
        .with_document(CC_AGENDA, &agenda_pdf())
}
