use tic::decoder::{Decoder, Event};
use tic::dialect::{Historique, PmePmi, Standard};
use tic::field::Payload;

const STX: u8 = 0x02;
const ETX: u8 = 0x03;
const LF: u8 = 0x0A;
const CR: u8 = 0x0D;

fn checksum(body: &[u8], compensate: bool) -> u8 {
    let mut sum: u8 = body.iter().fold(0, |acc, b| acc.wrapping_add(*b));
    if compensate {
        sum = sum.wrapping_sub(0x20);
    }
    (sum & 0x3F) + 0x20
}

fn frame_v01(label: &str, data: &str) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(label.as_bytes());
    body.push(0x20);
    body.extend_from_slice(data.as_bytes());
    body.push(0x20);
    let ck = checksum(&body, true);
    let mut frame = vec![STX, LF];
    frame.extend(body);
    frame.push(ck);
    frame.push(CR);
    frame.push(ETX);
    frame
}

fn frame_v02(label: &str, horodate: Option<&str>, data: &str) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(label.as_bytes());
    body.push(0x09);
    if let Some(h) = horodate {
        body.extend_from_slice(h.as_bytes());
        body.push(0x09);
    }
    body.extend_from_slice(data.as_bytes());
    body.push(0x09);
    let ck = checksum(&body, false);
    let mut frame = vec![STX, LF];
    frame.extend(body);
    frame.push(ck);
    frame.push(CR);
    frame.push(ETX);
    frame
}

fn run_all<D: tic::dialect::Dialect>(wire: &[u8]) -> Vec<Event> {
    let mut decoder = Decoder::<_, D>::new(wire);
    let mut events = Vec::new();
    while let Some(ev) = decoder.next_event().unwrap() {
        events.push(ev);
    }
    events
}

#[test]
fn empty_stream_yields_no_events() {
    let events = run_all::<Historique>(&[]);
    assert!(events.is_empty());
}

#[test]
fn historique_index_field_decodes_as_integer() {
    let wire = frame_v01("BASE", "012345678");
    let events = run_all::<Historique>(&wire);
    let fields: Vec<_> = events
        .into_iter()
        .filter_map(|e| if let Event::Field(f) = e { Some(f) } else { None })
        .collect();
    assert_eq!(fields.len(), 1);
    assert_eq!(fields[0].payload, Payload::Int(12345678));
    assert_eq!(fields[0].unit, tic::Unit::Wh);
}

#[test]
fn standard_dataset_with_horodate_and_data() {
    let wire = frame_v02("SINSTS", None, "01234");
    let events = run_all::<Standard>(&wire);
    let fields: Vec<_> = events
        .into_iter()
        .filter_map(|e| if let Event::Field(f) = e { Some(f) } else { None })
        .collect();
    assert_eq!(fields.len(), 1);
    assert_eq!(fields[0].payload, Payload::Int(1234));
}

#[test]
fn standard_horodated_max_power_field() {
    let wire = frame_v02("SMAXSN", Some("H230115120000"), "05420");
    let events = run_all::<Standard>(&wire);
    let fields: Vec<_> = events
        .into_iter()
        .filter_map(|e| if let Event::Field(f) = e { Some(f) } else { None })
        .collect();
    assert_eq!(fields.len(), 1);
    assert_eq!(fields[0].horodate.as_deref(), Some("H230115120000"));
    assert_eq!(fields[0].payload, Payload::Int(5420));
}

#[test]
fn a_full_frame_can_carry_more_than_one_dataset() {
    let mut wire = frame_v01("ADCO", "012345678901");
    // Splice a second dataset in before the ETX.
    let second = frame_v01("BASE", "000000001");
    let second_body = &second[1..second.len() - 1]; // keep the LF, drop STX and the trailing ETX
    wire.pop(); // drop ETX
    wire.extend_from_slice(second_body);
    wire.push(ETX);

    let events = run_all::<Historique>(&wire);
    let labels: Vec<_> = events
        .into_iter()
        .filter_map(|e| if let Event::Field(f) = e { Some(f.label()) } else { None })
        .collect();
    assert_eq!(labels, vec!["ADCO", "BASE"]);
}

#[test]
fn frame_end_reports_validity() {
    let wire = frame_v01("ADCO", "012345678901");
    let events = run_all::<Historique>(&wire);
    let valid = events.into_iter().find_map(|e| match e {
        Event::FrameEnd { valid } => Some(valid),
        _ => None,
    });
    assert_eq!(valid, Some(true));
}

#[test]
fn pme_pmi_horodated_marker_field() {
    let mut body = Vec::new();
    body.extend_from_slice(b"DATE");
    body.push(0x20);
    body.extend_from_slice(b"15/07/21 14:30:12");
    body.push(0x20);
    body.push(0x20);
    let ck = checksum(&body, true);
    let mut wire = vec![STX, LF];
    wire.extend(body);
    wire.push(ck);
    wire.push(CR);
    wire.push(ETX);

    let events = run_all::<PmePmi>(&wire);
    let fields: Vec<_> = events
        .into_iter()
        .filter_map(|e| if let Event::Field(f) = e { Some(f) } else { None })
        .collect();
    assert_eq!(fields.len(), 1);
    assert_eq!(fields[0].horodate.as_deref(), Some("15/07/21 14:30:12"));
}

#[test]
fn every_historique_label_round_trips_through_the_table() {
    for etiq in Historique::labels() {
        use tic::dialect::Dialect;
        assert_eq!(Historique::lookup(etiq.label.as_bytes()).map(|e| e.tag_id), Some(etiq.tag_id));
    }
}
