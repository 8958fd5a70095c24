//! Integration tests over complete DBC sources.

use dbcnet_core::load_from_memory;
use dbcnet_core::model::{
    AccessType, AttributeValue, ByteOrder, ExtendedValueType, MessageDiagnostic, Multiplexer,
    ObjectType, SignalDiagnostic, ValueType, VarType,
};
use dbcnet_core::parser::parse;
use dbcnet_core::resolver::{Resolver, TraceEvent, TraceLevel, Tracer};

const POWERTRAIN: &str = r#"VERSION "2.1"

NS_ :
    NS_DESC_
    CM_
    BA_DEF_
    BA_
    VAL_
    SIG_GROUP_
    SIG_VALTYPE_
    SG_MUL_VAL_

BS_: 500 : 1,2

BU_: ECU1 ECU2 Gateway

VAL_TABLE_ GearTable 0 "P" 1 "R" 2 "N" 3 "D" ;

BO_ 100 Engine: 8 ECU1
 SG_ Rpm : 0|16@1+ (0.25,0) [0|16383.75] "rpm" ECU2,Gateway
 SG_ Temp : 16|8@1- (1,-40) [-40|215] "degC" ECU2
 SG_ Torque : 32|32@1- (1,0) [0|0] "Nm" Gateway

BO_ 200 Gearbox: 4 ECU2
 SG_ Mode M : 0|4@1+ (1,0) [0|15] "" ECU1
 SG_ Gear m0 : 8|8@1+ (1,0) [0|3] "" ECU1
 SG_ Ratio m1 : 8|16@0+ (0.01,0) [0|10] "" ECU1

BO_ 300 Diag: 2 Gateway
 SG_ Code m2 : 0|8@1+ (1,0) [0|255] "" ECU1

BO_TX_BU_ 200 : ECU2,Gateway;

EV_ EV1 : 1 [0|100] "V" 5 7 DUMMY_NODE_VECTOR8003 ECU1;
EV_ Counter : 0 [0|65535] "" 0 8 DUMMY_NODE_VECTOR1 ECU2, Gateway;

ENVVAR_DATA_ EV1 : 4;

SGTYPE_ GearType : 8@1+ (1,0) [0|3] "" 0, GearTable;

CM_ "Powertrain network";
CM_ BU_ ECU1 "Engine controller";
CM_ BO_ 100 "Engine status";
CM_ SG_ 100 Rpm "Crankshaft speed";
CM_ EV_ Counter "Rolling counter";
CM_ "Ignored second network comment";

BA_DEF_ BU_ "NodeLayer" STRING ;
BA_DEF_ BU_ "NodeAddress" HEX 0 255;
BA_DEF_ BO_ "CycleTime" INT 0 10000;
BA_DEF_ "BusType" STRING ;
BA_DEF_ SG_ "Start" FLOAT -1 1;
BA_DEF_DEF_ "CycleTime" 100;
BA_DEF_DEF_ "BusType" "CAN";
BA_ "BusType" "CAN FD";
BA_ "NodeLayer" BU_ ECU1 "Application";
BA_ "NodeAddress" BU_ ECU1 17;
BA_ "CycleTime" BO_ 100 10;
BA_ "Start" SG_ 100 Temp 0.5;

VAL_ 200 Gear 0 "P" 1 "R" 2 "N" 3 "D" ;
VAL_ Counter 0 "zero" ;

SIG_GROUP_ 200 Shifting 1 : Mode Gear;
SIG_VALTYPE_ 100 Torque : 1;
SG_MUL_VAL_ 200 Ratio Mode 1-1;
"#;

#[derive(Default)]
struct Warnings(Vec<String>);

impl Tracer for Warnings {
    fn level(&self) -> TraceLevel {
        TraceLevel::Warn
    }

    fn trace(&mut self, _level: TraceLevel, event: TraceEvent<'_>) {
        match event {
            TraceEvent::SignalDiagnostic {
                message,
                signal,
                diagnostic,
            } => self.0.push(format!("{diagnostic}: {message}::{signal}")),
            TraceEvent::MessageDiagnostic {
                message,
                diagnostic,
            } => self.0.push(format!("{diagnostic}: {message}")),
            _ => {}
        }
    }
}

#[test]
fn test_load_powertrain_network() {
    let network = load_from_memory(POWERTRAIN).expect("network should load");

    assert_eq!(network.version(), "2.1");
    assert_eq!(network.new_symbols().len(), 8);
    assert_eq!(network.bit_timing().baudrate, 500);
    assert_eq!(network.bit_timing().btr2, 2);
    assert_eq!(network.comment(), Some("Powertrain network"));
    assert_eq!(network.nodes().len(), 3);
    assert_eq!(network.messages().len(), 3);
    assert_eq!(network.signal_count(), 7);
    assert_eq!(network.environment_variables().len(), 2);
    assert_eq!(network.attribute_definitions().len(), 5);
    assert_eq!(network.attribute_defaults().len(), 2);
    assert_eq!(network.attribute_values().len(), 1);
    assert_eq!(
        network.attribute_values()[0].value(),
        &AttributeValue::String("CAN FD".to_string())
    );
}

#[test]
fn test_nodes_and_node_attributes() {
    let network = load_from_memory(POWERTRAIN).unwrap();
    let ecu1 = network.node_by_name("ECU1").unwrap();

    assert_eq!(ecu1.comment(), "Engine controller");
    let names: Vec<_> = ecu1.attributes().iter().map(|a| a.name()).collect();
    assert_eq!(names, ["NodeLayer", "NodeAddress"]);
    assert!(ecu1
        .attributes()
        .iter()
        .all(|a| a.object_type() == ObjectType::Node));
    assert_eq!(
        ecu1.attributes()[1].value(),
        &AttributeValue::Int(17)
    );
    assert!(network.node_by_name("Gateway").unwrap().attributes().is_empty());
}

#[test]
fn test_message_and_signal_fields() {
    let network = load_from_memory(POWERTRAIN).unwrap();
    let engine = network.message_by_id(100).unwrap();

    assert_eq!(engine.name(), "Engine");
    assert_eq!(engine.transmitter(), "ECU1");
    assert_eq!(engine.comment(), "Engine status");
    assert_eq!(engine.attributes()[0].name(), "CycleTime");

    let rpm = engine.signal_by_name("Rpm").unwrap();
    assert_eq!(rpm.comment(), "Crankshaft speed");
    assert_eq!(rpm.byte_order(), ByteOrder::LittleEndian);
    assert_eq!(rpm.value_type(), ValueType::Unsigned);
    assert_eq!(rpm.receivers(), ["ECU2".to_string(), "Gateway".to_string()]);
    assert_eq!(rpm.unit(), "rpm");

    let temp = engine.signal_by_name("Temp").unwrap();
    assert_eq!(temp.value_type(), ValueType::Signed);
    assert_eq!(temp.attributes()[0].object_type(), ObjectType::Signal);

    let torque = engine.signal_by_name("Torque").unwrap();
    assert_eq!(torque.extended_value_type(), ExtendedValueType::Float);
    assert!(torque.diagnostics().is_empty());

    let gearbox = network.message_by_id(200).unwrap();
    assert_eq!(
        gearbox.message_transmitters(),
        ["ECU2".to_string(), "Gateway".to_string()]
    );
    assert_eq!(gearbox.signal_groups()[0].name(), "Shifting");
    assert_eq!(gearbox.signal_groups()[0].signal_names().len(), 2);

    let gear = gearbox.signal_by_name("Gear").unwrap();
    assert_eq!(gear.value_description(3), Some("D"));
    let ratio = gearbox.signal_by_name("Ratio").unwrap();
    assert_eq!(ratio.byte_order(), ByteOrder::BigEndian);
    assert!(ratio.signal_multiplexer_values()[0].selects(1));
}

#[test]
fn test_multiplexer_indicators() {
    let network = load_from_memory(POWERTRAIN).unwrap();
    let gearbox = network.message_by_id(200).unwrap();

    assert_eq!(gearbox.signals()[0].multiplexer(), Multiplexer::MuxSwitch);
    assert_eq!(gearbox.signals()[1].multiplexer(), Multiplexer::MuxValue(0));
    assert_eq!(gearbox.signals()[2].multiplexer(), Multiplexer::MuxValue(1));
    assert_eq!(gearbox.mux_switch().map(|s| s.name()), Some("Mode"));
    assert!(gearbox.diagnostics().is_empty());
}

#[test]
fn test_mux_value_without_switch() {
    let network = load_from_memory(POWERTRAIN).unwrap();
    let diag = network.message_by_id(300).unwrap();
    assert!(diag.has_diagnostic(MessageDiagnostic::MuxValueWithoutMuxSignal));
    assert_eq!(diag.diagnostic_mask(), 1);
}

#[test]
fn test_switch_without_values_is_clean() {
    let network = load_from_memory(
        r#"BO_ 1 Lonely: 8 ECU1
 SG_ Mux M : 0|8@1+ (1,0) [0|255] "" ECU1
"#,
    )
    .unwrap();
    assert!(network.messages()[0].diagnostics().is_empty());
    assert!(!network.has_diagnostics());
}

#[test]
fn test_environment_variables() {
    let network = load_from_memory(POWERTRAIN).unwrap();

    let ev1 = network.environment_variable_by_name("EV1").unwrap();
    assert_eq!(ev1.var_type(), VarType::Data);
    assert_eq!(ev1.data_size(), 4);
    assert_eq!(ev1.access_type(), AccessType::ReadWriteExtended);
    assert_eq!(ev1.id(), 7);

    let counter = network.environment_variable_by_name("Counter").unwrap();
    assert_eq!(counter.var_type(), VarType::Integer);
    assert_eq!(counter.data_size(), 0);
    assert_eq!(counter.access_type(), AccessType::Read);
    assert_eq!(counter.comment(), "Rolling counter");
    assert_eq!(counter.value_encoding_descriptions()[0].description, "zero");
    assert_eq!(
        counter.access_nodes(),
        ["ECU2".to_string(), "Gateway".to_string()]
    );
}

#[test]
fn test_value_tables() {
    let network = load_from_memory(POWERTRAIN).unwrap();
    let table = network.value_table_by_name("GearTable").unwrap();
    assert_eq!(table.value_encoding_descriptions().len(), 4);
    assert_eq!(table.signal_type().map(|st| st.name()), Some("GearType"));
}

#[test]
fn test_signal_exceeding_message_reports_only_that() {
    let network = load_from_memory(
        r#"BO_ 100 Msg: 8 ECU1
 SG_ Wide : 60|8@1+ (1,0) [0|255] "" ECU2
"#,
    )
    .unwrap();

    assert_eq!(network.messages().len(), 1);
    let message = &network.messages()[0];
    assert_eq!(message.signals().len(), 1);
    assert_eq!(
        message.signals()[0].diagnostics(),
        [SignalDiagnostic::SignalExceedsMessageSize]
    );
    assert!(message.diagnostics().is_empty());
}

#[test]
fn test_signal_filling_message_exactly_is_clean() {
    let network = load_from_memory(
        r#"BO_ 100 Msg: 8 ECU1
 SG_ Last : 56|8@1+ (1,0) [0|255] "" ECU2
"#,
    )
    .unwrap();
    assert!(!network.has_diagnostics());
}

#[test]
fn test_warnings_reported_in_source_order() {
    let doc = parse(
        r#"BO_ 1 First: 2 ECU1
 SG_ A m1 : 0|8@1+ (1,0) [0|255] "" ECU2
 SG_ B : 10|8@1+ (1,0) [0|255] "" ECU2
BO_ 2 Second: 8 ECU1
 SG_ F : 0|16@1- (1,0) [0|0] "" ECU2
SIG_VALTYPE_ 2 F : 1;
"#,
    )
    .unwrap();

    let mut warnings = Warnings::default();
    let network = Resolver::resolve_traced(&doc, &mut warnings);

    assert_eq!(
        warnings.0,
        [
            "SignalExceedsMessageSize: First::B",
            "MuxValueWithoutMuxSignal: First",
            "WrongBitSizeForExtendedDataType: Second::F",
        ]
    );
    let records: Vec<String> = network.diagnostics().iter().map(ToString::to_string).collect();
    assert_eq!(records.len(), 3);
}

#[test]
fn test_parse_failure_yields_no_network() {
    assert!(load_from_memory("BO_ notanumber Msg: 8 ECU1").is_none());
    assert!(load_from_memory("VERSION \"unterminated").is_none());
}

#[test]
fn test_empty_source_yields_empty_network() {
    let network = load_from_memory("").unwrap();
    assert!(network.messages().is_empty());
    assert!(network.nodes().is_empty());
    assert_eq!(network.version(), "");
}

#[test]
fn test_building_twice_is_identical() {
    let doc = parse(POWERTRAIN).unwrap();
    let first = Resolver::resolve(&doc);
    let second = Resolver::resolve(&doc);
    assert_eq!(first, second);
}

#[test]
fn test_parts_round_trip_rebuilds_lookups() {
    let network = load_from_memory(POWERTRAIN).unwrap();
    let rebuilt = dbcnet_core::model::Network::from_parts(network.clone().into_parts());
    assert_eq!(rebuilt, network);
    assert_eq!(rebuilt.message_by_id(300).unwrap().name(), "Diag");
}
