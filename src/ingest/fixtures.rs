/// Test fixtures: representative JSON payloads from the USGS NWIS services.
///
/// Small payloads are inlined below; the larger multi-series responses live
/// in `tests/data/` so the integration tests can share them.
///
/// NWIS response shape:
///   response.value.timeSeries[]
///     .name                          - "USGS:01541000:00060:00000"
///     .sourceInfo.siteCode[0].value  - site number (string)
///     .sourceInfo.siteCode[0].agencyCode
///     .sourceInfo.timeZoneInfo.defaultTimeZone.zoneOffset - "-05:00"
///     .variable.variableCode[0].value - parameter code (string)
///     .variable.options.option[]     - { "name": "Statistic", "optionCode": "00000" }
///     .variable.noDataValue          - sentinel for missing data (-999999)
///     .values[0].value[]
///       .value       - the measurement as a STRING (not a number)
///       .dateTime    - ISO 8601, with offset for IV, without for DV
///       .qualifiers[] - e.g. ["P"], ["P", "e"], ["A", "Ice"]

/// Two sites x two parameters, 15-minute data, 93 rows. Site 01541200
/// discharge skips three readings; site 01541000 stage carries one sentinel.
pub(crate) fn fixture_two_sites_two_params_json() -> &'static str {
    include_str!("../../tests/data/two_sites_two_params_iv.json")
}

/// One 15-minute discharge series with stacked qualifiers ("P,e", "P,Ice"),
/// a skipped reading at 10:45 and two sentinel values.
pub(crate) fn fixture_mult_flags_json() -> &'static str {
    include_str!("../../tests/data/mult_flags.json")
}

/// 30-minute discharge and 15-minute stage at Harrisburg.
pub(crate) fn fixture_diff_freq_json() -> &'static str {
    include_str!("../../tests/data/diff_freq.json")
}

/// One declared series whose value array is empty.
pub(crate) fn fixture_nothing_avail_json() -> &'static str {
    include_str!("../../tests/data/nothing_avail.json")
}

/// Single site (Kingston Mines 05568500) with both discharge and stage,
/// one reading each.
pub(crate) fn fixture_kingston_mines_json() -> &'static str {
    r#"{
      "value": {
        "timeSeries": [
          {
            "sourceInfo": {
              "siteName": "Illinois River at Kingston Mines, IL",
              "siteCode": [{ "value": "05568500", "network": "NWIS", "agencyCode": "USGS" }],
              "timeZoneInfo": { "defaultTimeZone": { "zoneOffset": "-06:00", "zoneAbbreviation": "CST" } }
            },
            "variable": {
              "variableCode": [{ "value": "00060", "network": "NWIS" }],
              "variableName": "Streamflow, ft&#179;/s",
              "unit": { "unitCode": "ft3/s" },
              "options": { "option": [{ "name": "Statistic", "optionCode": "00000" }] },
              "noDataValue": -999999.0
            },
            "values": [{
              "value": [
                { "value": "42300", "qualifiers": ["P"], "dateTime": "2024-05-01T12:00:00.000-05:00" }
              ],
              "qualifier": [{ "qualifierCode": "P", "qualifierDescription": "Provisional data subject to revision." }]
            }],
            "name": "USGS:05568500:00060:00000"
          },
          {
            "sourceInfo": {
              "siteName": "Illinois River at Kingston Mines, IL",
              "siteCode": [{ "value": "05568500", "network": "NWIS", "agencyCode": "USGS" }],
              "timeZoneInfo": { "defaultTimeZone": { "zoneOffset": "-06:00", "zoneAbbreviation": "CST" } }
            },
            "variable": {
              "variableCode": [{ "value": "00065", "network": "NWIS" }],
              "variableName": "Gage height, ft",
              "unit": { "unitCode": "ft" },
              "options": { "option": [{ "name": "Statistic", "optionCode": "00000" }] },
              "noDataValue": -999999.0
            },
            "values": [{
              "value": [
                { "value": "18.42", "qualifiers": ["P"], "dateTime": "2024-05-01T12:00:00.000-05:00" }
              ],
              "qualifier": [{ "qualifierCode": "P", "qualifierDescription": "Provisional data subject to revision." }]
            }],
            "name": "USGS:05568500:00065:00000"
          }
        ]
      }
    }"#
}

/// Daily mean discharge (statistic 00003) from the DV service. Timestamps
/// have no offset; 2019-01-03 is absent.
pub(crate) fn fixture_daily_values_json() -> &'static str {
    r#"{
      "value": {
        "timeSeries": [
          {
            "sourceInfo": {
              "siteName": "West Branch Susquehanna River at Bower, PA",
              "siteCode": [{ "value": "01541000", "network": "NWIS", "agencyCode": "USGS" }],
              "timeZoneInfo": { "defaultTimeZone": { "zoneOffset": "-05:00", "zoneAbbreviation": "EST" } }
            },
            "variable": {
              "variableCode": [{ "value": "00060", "network": "NWIS" }],
              "variableName": "Streamflow, ft&#179;/s",
              "unit": { "unitCode": "ft3/s" },
              "options": { "option": [{ "value": "Mean", "name": "Statistic", "optionCode": "00003" }] },
              "noDataValue": -999999.0
            },
            "values": [{
              "value": [
                { "value": "1110", "qualifiers": ["A"], "dateTime": "2019-01-01T00:00:00.000" },
                { "value": "1080", "qualifiers": ["A"], "dateTime": "2019-01-02T00:00:00.000" },
                { "value": "990", "qualifiers": ["A", "e"], "dateTime": "2019-01-04T00:00:00.000" },
                { "value": "960", "qualifiers": ["A"], "dateTime": "2019-01-05T00:00:00.000" }
              ],
              "qualifier": []
            }],
            "name": "USGS:01541000:00060:00003"
          }
        ]
      }
    }"#
}

/// Three readings delivered out of chronological order.
pub(crate) fn fixture_out_of_order_json() -> &'static str {
    r#"{
      "value": {
        "timeSeries": [
          {
            "sourceInfo": {
              "siteName": "Illinois River at Henry, IL",
              "siteCode": [{ "value": "05557000", "network": "NWIS", "agencyCode": "USGS" }]
            },
            "variable": {
              "variableCode": [{ "value": "00065", "network": "NWIS" }],
              "variableName": "Gage height, ft",
              "unit": { "unitCode": "ft" },
              "options": { "option": [{ "name": "Statistic", "optionCode": "00000" }] },
              "noDataValue": -999999.0
            },
            "values": [{
              "value": [
                { "value": "10.20", "qualifiers": ["P"], "dateTime": "2024-05-01T12:30:00.000-05:00" },
                { "value": "10.10", "qualifiers": ["P"], "dateTime": "2024-05-01T12:00:00.000-05:00" },
                { "value": "10.15", "qualifiers": ["P"], "dateTime": "2024-05-01T12:15:00.000-05:00" }
              ]
            }]
          }
        ]
      }
    }"#
}

/// The same instant reported twice, once with a different offset.
pub(crate) fn fixture_repeated_timestamp_json() -> &'static str {
    r#"{
      "value": {
        "timeSeries": [
          {
            "sourceInfo": {
              "siteName": "Illinois River at Henry, IL",
              "siteCode": [{ "value": "05557000", "network": "NWIS", "agencyCode": "USGS" }]
            },
            "variable": {
              "variableCode": [{ "value": "00065", "network": "NWIS" }],
              "options": { "option": [{ "name": "Statistic", "optionCode": "00000" }] },
              "noDataValue": -999999.0
            },
            "values": [{
              "value": [
                { "value": "10.10", "qualifiers": ["P"], "dateTime": "2024-05-01T12:00:00.000-05:00" },
                { "value": "10.10", "qualifiers": ["P"], "dateTime": "2024-05-01T13:00:00.000-04:00" }
              ]
            }]
          }
        ]
      }
    }"#
}

/// Kingston Mines discharge listed twice under the same key.
pub(crate) fn fixture_duplicate_series_json() -> &'static str {
    r#"{
      "value": {
        "timeSeries": [
          {
            "sourceInfo": {
              "siteName": "Illinois River at Kingston Mines, IL",
              "siteCode": [{ "value": "05568500", "network": "NWIS", "agencyCode": "USGS" }]
            },
            "variable": {
              "variableCode": [{ "value": "00060", "network": "NWIS" }],
              "options": { "option": [{ "name": "Statistic", "optionCode": "00000" }] },
              "noDataValue": -999999.0
            },
            "values": [{
              "value": [
                { "value": "42300", "qualifiers": ["P"], "dateTime": "2024-05-01T12:00:00.000-05:00" }
              ]
            }]
          },
          {
            "sourceInfo": {
              "siteName": "Illinois River at Kingston Mines, IL",
              "siteCode": [{ "value": "05568500", "network": "NWIS", "agencyCode": "USGS" }]
            },
            "variable": {
              "variableCode": [{ "value": "00060", "network": "NWIS" }],
              "options": { "option": [{ "name": "Statistic", "optionCode": "00000" }] },
              "noDataValue": -999999.0
            },
            "values": [{
              "value": [
                { "value": "42100", "qualifiers": ["P"], "dateTime": "2024-05-01T12:15:00.000-05:00" }
              ]
            }]
          }
        ]
      }
    }"#
}
