//! Contact-directory XML codec
//!
//! Converts between the external `EnterpriseContactDirectory` schema
//! (hierarchical, contact-centric) and the internal asset model. Optional
//! VoIP/XMPP/CustomServices sub-elements are captured verbatim into asset
//! metadata so a later export can reconstruct them.

use chrono::{DateTime, SecondsFormat, Utc};
use rand::Rng;
use roxmltree::{Document, Node};

use crate::entities::{
    Asset, AssetMetadata, AssetStatus, CustomService, Platform, Position, VoipService, XmppService,
};

/// Reference coordinate imported contacts are scattered around; the
/// directory format carries no geolocation.
const IMPORT_REF_LAT: f64 = 34.05;
const IMPORT_REF_LON: f64 = -118.24;

/// Separator joining Location and Notes into `metadata.notes`. The same
/// separator splits them back apart on export.
const NOTES_SEPARATOR: &str = " - ";

/// Result of decoding a contact directory: per-contact failures land in
/// `errors` without aborting the rest of the batch.
#[derive(Debug)]
pub struct ContactImport {
    pub assets: Vec<Asset>,
    pub errors: Vec<String>,
}

/// Parse a contact-directory XML document into asset records.
///
/// A malformed document yields one global error and no assets. `now`
/// stamps the synthesized positions.
pub fn parse_contact_directory(xml: &str, now: DateTime<Utc>) -> ContactImport {
    let doc = match Document::parse(xml) {
        Ok(doc) => doc,
        Err(e) => {
            return ContactImport {
                assets: Vec::new(),
                errors: vec![format!("Invalid XML: {}", e)],
            }
        }
    };

    let mut assets = Vec::new();
    let mut errors = Vec::new();
    let mut rng = rand::rng();

    for (idx, contact) in doc
        .descendants()
        .filter(|n| n.has_tag_name("Contact"))
        .enumerate()
    {
        match parse_contact(contact, idx, now, &mut rng) {
            Ok(asset) => assets.push(asset),
            Err(reason) => errors.push(format!("Contact {}: {}", idx, reason)),
        }
    }

    ContactImport { assets, errors }
}

fn parse_contact(
    node: Node,
    idx: usize,
    now: DateTime<Utc>,
    rng: &mut impl Rng,
) -> Result<Asset, String> {
    let raw_id = node
        .attribute("id")
        .map(str::to_string)
        .unwrap_or_else(|| format!("imported-{}", idx));

    let platform = node
        .attribute("platform")
        .and_then(|p| p.parse::<Platform>().ok())
        .unwrap_or(Platform::Site);

    let name = child_text(node, "Name").trim().to_string();
    if name.is_empty() {
        return Err("missing Name element".to_string());
    }

    let location = child_text(node, "Location");
    let department = child_text(node, "Department");
    let notes = child_text(node, "Notes");

    let voip = node
        .children()
        .find(|c| c.has_tag_name("VoIP"))
        .map(|v| VoipService {
            ip: child_text(v, "IP"),
            port: child_text(v, "Port"),
            extension: child_text(v, "Extension"),
            codec: child_text(v, "Codec"),
            protocol: child_text(v, "Protocol"),
            transport: child_text(v, "Transport"),
        });

    let xmpp = node
        .children()
        .find(|c| c.has_tag_name("XMPP"))
        .map(|x| XmppService {
            jid: child_text(x, "JID"),
            server: child_text(x, "Server"),
            ip: child_text(x, "IP"),
            port: child_text(x, "Port"),
            encryption: child_text(x, "Encryption"),
            conference: child_text(x, "Conference"),
        });

    let custom_services: Vec<CustomService> = node
        .children()
        .find(|c| c.has_tag_name("CustomServices"))
        .map(|cs| {
            cs.children()
                .filter(|s| s.has_tag_name("Service"))
                .map(|s| CustomService {
                    name: child_text(s, "ServiceName"),
                    ip: child_text(s, "IP"),
                    port: child_text(s, "Port"),
                    description: child_text(s, "Description"),
                })
                .collect()
        })
        .unwrap_or_default();

    let joined_notes: String = [location.as_str(), notes.as_str()]
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(NOTES_SEPARATOR);

    Ok(Asset {
        id: format!("asset-{}", raw_id),
        callsign: derive_callsign(&name),
        name,
        platform,
        position: Position {
            lat: IMPORT_REF_LAT + (rng.random::<f64>() - 0.5) * 0.3,
            lon: IMPORT_REF_LON + (rng.random::<f64>() - 0.5) * 0.3,
            alt_m: if platform == Platform::Aircraft {
                3000.0
            } else {
                0.0
            },
            heading_deg: 0.0,
            speed_kts: 0.0,
            timestamp: now,
        },
        status: AssetStatus::Active,
        commlinks: Vec::new(),
        addressbook_ref: raw_id,
        icon: platform.as_str().to_string(),
        metadata: AssetMetadata {
            department,
            notes: joined_notes,
            voip,
            xmpp,
            custom_services,
        },
    })
}

/// Text of the first child element with the given tag, or empty
fn child_text(node: Node, name: &str) -> String {
    node.children()
        .find(|c| c.has_tag_name(name))
        .and_then(|c| c.text())
        .unwrap_or("")
        .to_string()
}

/// Derive a callsign from an asset name: uppercase, whitespace runs
/// collapsed to a single dash, truncated to 10 characters.
pub fn derive_callsign(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_uppercase()
        .chars()
        .take(10)
        .collect()
}

/// Serialize assets to contact-directory XML.
///
/// Contacts are keyed by `addressbook_ref` (falling back to the internal
/// id); `metadata.notes` is split back into Location/Notes on the same
/// separator used at import; VoIP/XMPP/CustomServices re-emit only when
/// the side-channel data is present.
pub fn export_contact_directory(assets: &[Asset], exported: DateTime<Utc>) -> String {
    let stamp = exported.to_rfc3339_opts(SecondsFormat::Millis, true);

    let mut xml = String::new();
    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str(
        "<?xml-stylesheet type=\"text/xsl\" href=\"enterprise-contact-directory.xsl\"?>\n",
    );
    xml.push_str(&format!(
        "<EnterpriseContactDirectory exported=\"{}\" version=\"1.0\">\n\n",
        esc(&stamp)
    ));

    for asset in assets {
        let contact_ref = if asset.addressbook_ref.is_empty() {
            &asset.id
        } else {
            &asset.addressbook_ref
        };

        xml.push_str(&format!(
            "  <Contact id=\"{}\" platform=\"{}\">\n",
            esc(contact_ref),
            esc(asset.platform.as_str())
        ));
        xml.push_str(&format!("    <Name>{}</Name>\n", esc(&asset.name)));

        let mut parts = asset.metadata.notes.split(NOTES_SEPARATOR);
        let location = parts.next().unwrap_or("");
        let note = parts.collect::<Vec<_>>().join(NOTES_SEPARATOR);

        if !location.is_empty() {
            xml.push_str(&format!("    <Location>{}</Location>\n", esc(location)));
        }
        if !asset.metadata.department.is_empty() {
            xml.push_str(&format!(
                "    <Department>{}</Department>\n",
                esc(&asset.metadata.department)
            ));
        }
        if !note.is_empty() {
            xml.push_str(&format!("    <Notes>{}</Notes>\n", esc(&note)));
        }
        xml.push_str(&format!("    <CreatedAt>{}</CreatedAt>\n", esc(&stamp)));
        xml.push_str(&format!("    <UpdatedAt>{}</UpdatedAt>\n", esc(&stamp)));

        if let Some(voip) = &asset.metadata.voip {
            if !voip.ip.is_empty() {
                xml.push_str("    <VoIP>\n");
                xml.push_str(&format!("      <IP>{}</IP>\n", esc(&voip.ip)));
                push_opt(&mut xml, "      ", "Port", &voip.port);
                push_opt(&mut xml, "      ", "Extension", &voip.extension);
                push_opt(&mut xml, "      ", "Codec", &voip.codec);
                push_opt(&mut xml, "      ", "Protocol", &voip.protocol);
                push_opt(&mut xml, "      ", "Transport", &voip.transport);
                xml.push_str("    </VoIP>\n");
            }
        }

        if let Some(xmpp) = &asset.metadata.xmpp {
            if !xmpp.jid.is_empty() {
                xml.push_str("    <XMPP>\n");
                xml.push_str(&format!("      <JID>{}</JID>\n", esc(&xmpp.jid)));
                push_opt(&mut xml, "      ", "Server", &xmpp.server);
                push_opt(&mut xml, "      ", "IP", &xmpp.ip);
                push_opt(&mut xml, "      ", "Port", &xmpp.port);
                push_opt(&mut xml, "      ", "Encryption", &xmpp.encryption);
                push_opt(&mut xml, "      ", "Conference", &xmpp.conference);
                xml.push_str("    </XMPP>\n");
            }
        }

        if !asset.metadata.custom_services.is_empty() {
            xml.push_str("    <CustomServices>\n");
            for service in &asset.metadata.custom_services {
                xml.push_str("      <Service>\n");
                xml.push_str(&format!(
                    "        <ServiceName>{}</ServiceName>\n",
                    esc(&service.name)
                ));
                push_opt(&mut xml, "        ", "IP", &service.ip);
                push_opt(&mut xml, "        ", "Port", &service.port);
                push_opt(&mut xml, "        ", "Description", &service.description);
                xml.push_str("      </Service>\n");
            }
            xml.push_str("    </CustomServices>\n");
        }

        xml.push_str("  </Contact>\n\n");
    }

    xml.push_str("</EnterpriseContactDirectory>\n");
    xml
}

fn push_opt(xml: &mut String, indent: &str, tag: &str, value: &str) {
    if !value.is_empty() {
        xml.push_str(&format!("{}<{}>{}</{}>\n", indent, tag, esc(value), tag));
    }
}

/// Escape the five XML metacharacters for text and attribute positions
fn esc(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Export filename following the contact-directory convention:
/// `enterprise-contact-directory_<YYYY-MM-DD>_<HHMMSS>_<N>-contacts.xml`
pub fn export_filename(count: usize, at: DateTime<Utc>) -> String {
    format!(
        "enterprise-contact-directory_{}_{}_{}-contacts.xml",
        at.format("%Y-%m-%d"),
        at.format("%H%M%S"),
        count
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        "2026-08-07T09:30:00Z".parse().unwrap()
    }

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<EnterpriseContactDirectory exported="2026-08-01T00:00:00.000Z" version="1.0">
  <Contact id="c014-fire-station" platform="site">
    <Name>Fire Station 7</Name>
    <Location>Downtown</Location>
    <Department>Emergency Services</Department>
    <Notes>Staffed around the clock</Notes>
    <VoIP>
      <IP>10.1.2.3</IP>
      <Port>5060</Port>
      <Codec>G.711</Codec>
    </VoIP>
    <XMPP>
      <JID>fire7@chat.example.org</JID>
      <Server>chat.example.org</Server>
    </XMPP>
    <CustomServices>
      <Service>
        <ServiceName>Dispatch &amp; Telemetry</ServiceName>
        <IP>10.1.2.9</IP>
        <Description>Primary CAD feed</Description>
      </Service>
    </CustomServices>
  </Contact>
  <Contact id="c015-patrol-12" platform="mobile">
    <Name>Patrol 12</Name>
  </Contact>
</EnterpriseContactDirectory>
"#;

    #[test]
    fn test_parse_sample_directory() {
        let result = parse_contact_directory(SAMPLE, now());
        assert!(result.errors.is_empty(), "{:?}", result.errors);
        assert_eq!(result.assets.len(), 2);

        let fire = &result.assets[0];
        assert_eq!(fire.id, "asset-c014-fire-station");
        assert_eq!(fire.addressbook_ref, "c014-fire-station");
        assert_eq!(fire.name, "Fire Station 7");
        assert_eq!(fire.callsign, "FIRE-STATI");
        assert_eq!(fire.platform, Platform::Site);
        assert_eq!(fire.status, AssetStatus::Active);
        assert!(fire.commlinks.is_empty());
        assert_eq!(fire.metadata.department, "Emergency Services");
        assert_eq!(fire.metadata.notes, "Downtown - Staffed around the clock");

        let voip = fire.metadata.voip.as_ref().unwrap();
        assert_eq!(voip.ip, "10.1.2.3");
        assert_eq!(voip.port, "5060");
        assert_eq!(voip.codec, "G.711");
        assert_eq!(voip.transport, "");

        let xmpp = fire.metadata.xmpp.as_ref().unwrap();
        assert_eq!(xmpp.jid, "fire7@chat.example.org");

        assert_eq!(fire.metadata.custom_services.len(), 1);
        assert_eq!(fire.metadata.custom_services[0].name, "Dispatch & Telemetry");

        let patrol = &result.assets[1];
        assert_eq!(patrol.platform, Platform::Mobile);
        assert!(patrol.metadata.voip.is_none());
        assert!(patrol.metadata.custom_services.is_empty());
    }

    #[test]
    fn test_parse_synthesizes_positions() {
        let xml = r#"<EnterpriseContactDirectory>
            <Contact id="a1" platform="aircraft"><Name>Air One</Name></Contact>
            <Contact id="g1" platform="site"><Name>Ground One</Name></Contact>
        </EnterpriseContactDirectory>"#;

        let result = parse_contact_directory(xml, now());
        let air = &result.assets[0];
        let ground = &result.assets[1];

        assert_eq!(air.position.alt_m, 3000.0);
        assert_eq!(ground.position.alt_m, 0.0);
        assert!((air.position.lat - IMPORT_REF_LAT).abs() <= 0.15);
        assert!((air.position.lon - IMPORT_REF_LON).abs() <= 0.15);
        assert_eq!(air.position.timestamp, now());
    }

    #[test]
    fn test_parse_defaults_id_and_platform() {
        let xml = r#"<EnterpriseContactDirectory>
            <Contact platform="submarine"><Name>Mystery</Name></Contact>
        </EnterpriseContactDirectory>"#;

        let result = parse_contact_directory(xml, now());
        assert_eq!(result.assets.len(), 1);
        assert_eq!(result.assets[0].id, "asset-imported-0");
        assert_eq!(result.assets[0].platform, Platform::Site);
    }

    #[test]
    fn test_malformed_document_is_one_global_error() {
        let result = parse_contact_directory("<EnterpriseContactDirectory><Contact>", now());
        assert!(result.assets.is_empty());
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].starts_with("Invalid XML:"));
    }

    #[test]
    fn test_contact_without_name_fails_alone() {
        let xml = r#"<EnterpriseContactDirectory>
            <Contact id="bad"></Contact>
            <Contact id="good"><Name>Good One</Name></Contact>
        </EnterpriseContactDirectory>"#;

        let result = parse_contact_directory(xml, now());
        assert_eq!(result.assets.len(), 1);
        assert_eq!(result.assets[0].id, "asset-good");
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].starts_with("Contact 0:"));
    }

    #[test]
    fn test_derive_callsign() {
        assert_eq!(derive_callsign("Fire Station 7"), "FIRE-STATI");
        assert_eq!(derive_callsign("Ops"), "OPS");
        assert_eq!(derive_callsign("a   b"), "A-B");
    }

    #[test]
    fn test_export_escapes_metacharacters() {
        let result = parse_contact_directory(SAMPLE, now());
        let mut asset = result.assets[0].clone();
        asset.name = "Fire & <Rescue> \"Station\" 'Seven'".to_string();

        let xml = export_contact_directory(&[asset], now());
        assert!(xml.contains("Fire &amp; &lt;Rescue&gt; &quot;Station&quot; &apos;Seven&apos;"));
        assert!(!xml.contains("Fire & <Rescue>"));
    }

    #[test]
    fn test_export_structure() {
        let result = parse_contact_directory(SAMPLE, now());
        let xml = export_contact_directory(&result.assets, now());

        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains("<EnterpriseContactDirectory exported=\"2026-08-07T09:30:00.000Z\" version=\"1.0\">"));
        assert!(xml.contains("<Contact id=\"c014-fire-station\" platform=\"site\">"));
        assert!(xml.contains("<Location>Downtown</Location>"));
        assert!(xml.contains("<Notes>Staffed around the clock</Notes>"));
        assert!(xml.ends_with("</EnterpriseContactDirectory>\n"));
        // contact without side-channel data emits no service blocks
        assert_eq!(xml.matches("<VoIP>").count(), 1);
        assert_eq!(xml.matches("<XMPP>").count(), 1);
    }

    #[test]
    fn test_semantic_roundtrip() {
        let first = parse_contact_directory(SAMPLE, now());
        assert!(first.errors.is_empty());

        let xml = export_contact_directory(&first.assets, now());
        let second = parse_contact_directory(&xml, now());
        assert!(second.errors.is_empty(), "{:?}", second.errors);
        assert_eq!(first.assets.len(), second.assets.len());

        for (a, b) in first.assets.iter().zip(second.assets.iter()) {
            assert_eq!(a.id, b.id);
            assert_eq!(a.addressbook_ref, b.addressbook_ref);
            assert_eq!(a.name, b.name);
            assert_eq!(a.callsign, b.callsign);
            assert_eq!(a.platform, b.platform);
            assert_eq!(a.metadata.department, b.metadata.department);
            assert_eq!(a.metadata.notes, b.metadata.notes);
            assert_eq!(a.metadata.voip, b.metadata.voip);
            assert_eq!(a.metadata.xmpp, b.metadata.xmpp);
            assert_eq!(a.metadata.custom_services, b.metadata.custom_services);
        }
    }

    #[test]
    fn test_export_filename_convention() {
        let at: DateTime<Utc> = "2026-08-07T14:05:09Z".parse().unwrap();
        assert_eq!(
            export_filename(42, at),
            "enterprise-contact-directory_2026-08-07_140509_42-contacts.xml"
        );
    }
}
